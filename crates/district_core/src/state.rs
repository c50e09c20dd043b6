use crate::{District, DistrictId, GameError, GameState, Player};

impl GameState {
    pub fn district(&self, id: DistrictId) -> Option<&District> {
        self.districts.iter().find(|d| d.id == id)
    }

    /// The district the player is standing in.
    pub fn current_district(&self) -> Result<&District, GameError> {
        self.district(self.player.district_id)
            .ok_or(GameError::UnknownDistrict(self.player.district_id))
    }

    /// Split borrow of the player and their current district.
    pub(crate) fn player_and_district_mut(
        &mut self,
    ) -> Result<(&mut Player, &mut District), GameError> {
        let id = self.player.district_id;
        let district = self
            .districts
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or(GameError::UnknownDistrict(id))?;
        Ok((&mut self.player, district))
    }
}
