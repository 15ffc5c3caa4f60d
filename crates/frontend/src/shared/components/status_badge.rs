use contracts::domain::a001_travel_request::{RequestStatus, StatusTone};
use leptos::prelude::*;

fn tone_class(tone: StatusTone) -> &'static str {
    match tone {
        StatusTone::Neutral => "badge--neutral",
        StatusTone::Informative => "badge--primary",
        StatusTone::Warning => "badge--warning",
        StatusTone::Success => "badge--success",
        StatusTone::Danger => "badge--error",
    }
}

/// Colored label for a request status
#[component]
pub fn StatusBadge(#[prop(into)] status: Signal<RequestStatus>) -> impl IntoView {
    view! {
        <span class=move || format!("badge badge--status {}", tone_class(status.get().tone()))>
            {move || status.get().label()}
        </span>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_status_has_a_badge_class() {
        for status in RequestStatus::ALL {
            assert!(tone_class(status.tone()).starts_with("badge--"));
        }
        assert_eq!(tone_class(RequestStatus::Denied.tone()), "badge--error");
        assert_eq!(tone_class(RequestStatus::Completed.tone()), "badge--success");
    }
}
