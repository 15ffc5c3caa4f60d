use leptos::prelude::*;
use leptos_router::hooks::use_location;

use crate::layout::app_state::AppState;
use crate::shared::icons::icon;

/// Help text for the screen at `path`
pub fn tutorial_for(path: &str) -> &'static str {
    let segments: Vec<&str> = path.trim_matches('/').split('/').collect();
    match segments.as_slice() {
        ["dashboard"] => "Elige una de las opciones disponibles para tu perfil.",
        ["requests"] => "Aquí ves tus solicitudes de viaje. Usa \"Ver\" para consultar el detalle.",
        ["requests", "new"] => {
            "Describe el motivo del viaje y agrega un renglón por cada destino. \
             Las fechas usan el formato AAAA-MM-DD."
        }
        ["requests", _, "edit"] => {
            "Corrige lo que pidió tu aprobador y vuelve a enviar la solicitud."
        }
        ["requests", _, "vouchers"] => {
            "Agrega un renglón por comprobante. El PDF es obligatorio; el XML (CFDI) \
             solo para gastos en MXN."
        }
        ["requests", _] => "Consulta destinos, revisiones y comprobantes de la solicitud.",
        ["approvals"] => {
            "Expande una solicitud para ver sus destinos. Puedes aprobarla, denegarla o pedir cambios."
        }
        ["refunds"] => "Solicitudes con comprobantes listos para reembolso.",
        ["bookings"] => "Asigna una agencia de viajes a cada solicitud aprobada.",
        ["history"] => "Todas las solicitudes registradas. Filtra por estado.",
        _ => "Usa el menú de la izquierda para navegar.",
    }
}

/// Dismissible help banner, shown while the tutorial flag is on
#[component]
pub fn TutorialBanner(app: AppState) -> impl IntoView {
    let location = use_location();

    view! {
        <Show when=move || app.show_tutorial.get()>
            <div class="tutorial-banner">
                {icon("info")}
                <span class="tutorial-banner__text">
                    {move || location.pathname.with(|p| tutorial_for(p))}
                </span>
                <button
                    class="tutorial-banner__close"
                    title="No volver a mostrar"
                    on:click=move |_| app.dismiss_tutorial()
                >
                    {icon("x")}
                </button>
            </div>
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tutorial_for_routes() {
        assert!(tutorial_for("/requests/new").contains("AAAA-MM-DD"));
        assert!(tutorial_for("/requests/12/vouchers").contains("XML"));
        assert!(tutorial_for("/requests/12/edit").contains("Corrige"));
        assert!(tutorial_for("/requests/12").contains("revisiones"));
        assert_eq!(tutorial_for("/nope"), "Usa el menú de la izquierda para navegar.");
    }
}
