//! The arithmetic mini-games and their shared helpers.

pub mod chansey;
pub mod diglett;
pub mod meowth;
pub mod money;
pub mod options;
pub mod pikachu;
pub mod silhouette;
pub mod snorlax;

pub use chansey::ChanseyGame;
pub use diglett::DiglettGame;
pub use meowth::MeowthGame;
pub use pikachu::PikachuGame;
pub use silhouette::SilhouetteGame;
pub use snorlax::SnorlaxGame;

/// Menu entries, in menu order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MinigameKind {
    Snorlax,
    Diglett,
    Meowth,
    Chansey,
    Pikachu,
    Silhouette,
}

impl MinigameKind {
    pub const ALL: [MinigameKind; 6] = [
        MinigameKind::Snorlax,
        MinigameKind::Diglett,
        MinigameKind::Meowth,
        MinigameKind::Chansey,
        MinigameKind::Pikachu,
        MinigameKind::Silhouette,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            MinigameKind::Snorlax => "snorlax",
            MinigameKind::Diglett => "diglett",
            MinigameKind::Meowth => "meowth",
            MinigameKind::Chansey => "chansey",
            MinigameKind::Pikachu => "pikachu",
            MinigameKind::Silhouette => "silhouette",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            MinigameKind::Snorlax => "La comida de Snorlax",
            MinigameKind::Diglett => "Contador de Digletts",
            MinigameKind::Meowth => "Los cofres de Meowth",
            MinigameKind::Chansey => "El mercado de Chansey",
            MinigameKind::Pikachu => "¿Cuántos Pikachus?",
            MinigameKind::Silhouette => "Escáner de siluetas",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }
}
