//! Rejection taxonomy. Every variant is non-fatal: the resolver that returns it
//! has not touched the game state, and its `Display` text is what the player
//! sees in the event log.

use thiserror::Error;

use crate::{BuildingKind, DistrictId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("Not enough CROWN! Need {needed}, have {available}.")]
    InsufficientFunds { needed: u64, available: u64 },
    #[error("Not enough CROWN to pay tax!")]
    TaxUnpaid { tax: u64, available: u64 },
    #[error("Not enough energy! Need {needed}, have {available}.")]
    InsufficientEnergy { needed: u32, available: u32 },
    #[error("{0}")]
    InvalidTarget(String),
    #[error("Unknown action: {0}")]
    UnknownAction(String),
    #[error("Nothing to do at the {0} building.")]
    UnknownBuildingType(BuildingKind),
    #[error("Select a role first!")]
    RoleNotSelected,
    #[error("You already have an active Season Pass!")]
    SeasonPassAlreadyActive,
    #[error("District {0} does not exist.")]
    UnknownDistrict(DistrictId),
}

impl GameError {
    /// Stable machine-readable name for API clients.
    pub fn kind(&self) -> &'static str {
        match self {
            GameError::InsufficientFunds { .. } | GameError::TaxUnpaid { .. } => {
                "insufficient_funds"
            }
            GameError::InsufficientEnergy { .. } => "insufficient_energy",
            GameError::InvalidTarget(_) => "invalid_target",
            GameError::UnknownAction(_) => "unknown_action",
            GameError::UnknownBuildingType(_) => "unknown_building_type",
            GameError::RoleNotSelected => "role_not_selected",
            GameError::SeasonPassAlreadyActive => "season_pass_already_active",
            GameError::UnknownDistrict(_) => "unknown_district",
        }
    }

    /// Fails with `InsufficientFunds` unless `available` covers `needed`.
    pub fn check_funds(needed: u64, available: u64) -> Result<(), GameError> {
        if available < needed {
            return Err(GameError::InsufficientFunds { needed, available });
        }
        Ok(())
    }

    /// Fails with `InsufficientEnergy` unless `available` covers `needed`.
    pub fn check_energy(needed: u32, available: u32) -> Result<(), GameError> {
        if available < needed {
            return Err(GameError::InsufficientEnergy { needed, available });
        }
        Ok(())
    }
}
