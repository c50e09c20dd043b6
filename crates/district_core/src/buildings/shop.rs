use crate::bounds::{scale_pct, shift_percent};
use crate::{
    Event, GameContent, GameError, GameState, InventoryItem, ItemCategory, ItemId, Outcome, Role,
    Severity, ShopDef, WorldState,
};

/// Shelf price after any role discount tied to the district's world state.
pub fn shop_price(shop: &ShopDef, base: u64, role: Option<Role>, world_state: WorldState) -> u64 {
    let Some(role) = role else {
        return base;
    };
    shop.discounts
        .iter()
        .find(|d| d.role == role && d.world_state == world_state)
        .map_or(base, |d| scale_pct(base, d.price_pct))
}

pub(super) fn buy(
    state: &mut GameState,
    content: &GameContent,
    item: &ItemId,
) -> Result<Outcome, GameError> {
    let def = content
        .shop
        .items
        .iter()
        .find(|i| &i.id == item)
        .ok_or_else(|| GameError::InvalidTarget(format!("{item} is not for sale.")))?;
    let world_state = state.current_district()?.world_state;
    let price = shop_price(&content.shop, def.price, state.player.role, world_state);
    GameError::check_funds(price, state.player.crown)?;

    let (player, district) = state.player_and_district_mut()?;
    player.crown -= price;
    player.inventory.push(InventoryItem {
        id: def.id.clone(),
        icon: def.icon.clone(),
        name: def.name.clone(),
        category: Some(ItemCategory::Item),
    });
    district.prosperity = shift_percent(district.prosperity, content.shop.prosperity_bonus);

    let mut outcome = Outcome::default();
    outcome
        .event(Event::ItemPurchased {
            item: def.id.clone(),
            price,
        })
        .event(Event::DistrictShifted {
            district: district.id,
            crime: district.crime,
            prosperity: district.prosperity,
        })
        .say(format!("Purchased {}!", def.name), Severity::Success);
    Ok(outcome)
}
