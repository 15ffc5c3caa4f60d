//! Navigation entries shared by the dashboard mosaics and the sidebar.

use contracts::system::auth::permissions::*;
use contracts::system::auth::{is_permitted, PermissionMode};

/// Dashboard tile / sidebar link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mosaic {
    pub path: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    /// Holding any of these shows the entry
    pub permissions: &'static [&'static str],
}

pub const MOSAICS: &[Mosaic] = &[
    Mosaic {
        path: "/requests/new",
        title: "Crear solicitud",
        description: "Registra un nuevo viaje con sus destinos",
        icon: "plus",
        permissions: &[CREATE_REQUEST],
    },
    Mosaic {
        path: "/requests",
        title: "Mis solicitudes",
        description: "Consulta el estado de tus viajes",
        icon: "plane",
        permissions: &[VIEW_REQUESTS],
    },
    Mosaic {
        path: "/approvals",
        title: "Aprobaciones",
        description: "Revisa las solicitudes de tu equipo",
        icon: "clipboard-check",
        permissions: &[APPROVE_REQUEST],
    },
    Mosaic {
        path: "/refunds",
        title: "Reembolsos",
        description: "Aprueba comprobaciones y reembolsos (SOI)",
        icon: "dollar-sign",
        permissions: &[CHECK_BUDGETS],
    },
    Mosaic {
        path: "/bookings",
        title: "Agencia de viajes",
        description: "Asigna agencia a los viajes aprobados",
        icon: "building",
        permissions: &[ASSIGN_TRAVEL_AGENCY],
    },
    Mosaic {
        path: "/history",
        title: "Historial",
        description: "Todas las solicitudes registradas",
        icon: "history",
        permissions: &[VIEW_HISTORY],
    },
];

/// Entries the holder of `held` may open, in menu order
pub fn visible_mosaics<S: AsRef<str>>(held: &[S]) -> Vec<Mosaic> {
    MOSAICS
        .iter()
        .filter(|m| is_permitted(held, m.permissions, PermissionMode::Any))
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_mosaics_filters_by_permission() {
        let held = vec![CREATE_REQUEST.to_string(), VIEW_REQUESTS.to_string()];
        let paths: Vec<&str> = visible_mosaics(&held).iter().map(|m| m.path).collect();
        assert_eq!(paths, vec!["/requests/new", "/requests"]);
    }

    #[test]
    fn test_no_permissions_no_mosaics() {
        let held: Vec<String> = Vec::new();
        assert!(visible_mosaics(&held).is_empty());
    }

    #[test]
    fn test_paths_are_unique() {
        for (i, a) in MOSAICS.iter().enumerate() {
            for b in &MOSAICS[i + 1..] {
                assert_ne!(a.path, b.path);
            }
        }
    }
}
