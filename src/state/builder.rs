use tracing::{debug, warn};

use crate::error::{OrderError, Result};
use crate::models::{Base, DeliveryAddress, DishSelection, FinalizedOrder, OrderDraft, PriceBreakdown};
use crate::pricing::calculations::compute_price_breakdown;
use crate::pricing::constants::{
    DRAFT_STORAGE_KEY, MAX_DISHES, MAX_EXTRA_UNITS, MAX_QUANTITY, MAX_STEP, MIN_EXTRA_UNITS,
    MIN_QUANTITY, MIN_STEP,
};
use crate::state::persistence::{decode_draft, encode_draft};
use crate::state::store::DraftStore;

/// What a call to [`OrderBuilder::select_dish`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DishToggle {
    Added,
    Removed,
    /// Two dishes were already selected; nothing changed.
    Ignored,
}

/// Owns the in-progress order draft and keeps it persisted.
///
/// Every mutation writes the whole draft back to the store. Out-of-range
/// inputs are clamped and a third dish is ignored; none of these are errors.
/// The builder is the draft's only writer, so `&mut self` serializes access.
pub struct OrderBuilder<S: DraftStore> {
    draft: OrderDraft,
    store: S,
}

impl<S: DraftStore> OrderBuilder<S> {
    /// Create a builder, resuming the stored draft if one exists.
    pub fn load(store: S) -> Self {
        let draft = match store.get(DRAFT_STORAGE_KEY) {
            Ok(Some(raw)) => decode_draft(&raw),
            Ok(None) => OrderDraft::default(),
            Err(e) => {
                warn!("Could not read stored draft, starting fresh: {}", e);
                OrderDraft::default()
            }
        };
        debug!(
            "Draft loaded: {} dishes, step {}",
            draft.selected_dishes().len(),
            draft.step()
        );
        Self { draft, store }
    }

    pub fn draft(&self) -> &OrderDraft {
        &self.draft
    }

    /// Give back the underlying store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Toggle a dish: remove it if selected, add it if there is room.
    pub fn select_dish(&mut self, dish: &DishSelection) -> DishToggle {
        let dishes = &mut self.draft.selected_dishes;
        let outcome = if let Some(pos) = dishes.iter().position(|d| d.name == dish.name) {
            dishes.remove(pos);
            DishToggle::Removed
        } else if dishes.len() < MAX_DISHES {
            dishes.push(dish.clone());
            DishToggle::Added
        } else {
            DishToggle::Ignored
        };
        debug!("select_dish {:?}: {:?}", dish.name, outcome);
        self.persist();
        outcome
    }

    pub fn select_base(&mut self, base: Base) {
        debug!("select_base {}", base.as_str());
        self.draft.base = base;
        self.persist();
    }

    /// Store extra rotis clamped to 0..=3.
    pub fn set_extra_units(&mut self, n: i64) {
        self.draft.extra_units = clamp_u32(n, MIN_EXTRA_UNITS, MAX_EXTRA_UNITS);
        debug!("set_extra_units {} -> {}", n, self.draft.extra_units);
        self.persist();
    }

    /// Store quantity clamped to 1..=5.
    pub fn set_quantity(&mut self, n: i64) {
        self.draft.quantity = clamp_u32(n, MIN_QUANTITY, MAX_QUANTITY);
        debug!("set_quantity {} -> {}", n, self.draft.quantity);
        self.persist();
    }

    /// Replace the delivery address wholesale. No validation here.
    pub fn set_address(&mut self, address: Option<DeliveryAddress>) {
        debug!("set_address (present: {})", address.is_some());
        self.draft.delivery_address = address;
        self.persist();
    }

    pub fn set_special_instructions(&mut self, text: impl Into<String>) {
        self.draft.special_instructions = text.into();
        self.persist();
    }

    pub fn advance_step(&mut self) {
        self.goto_step(self.draft.step as i64 + 1);
    }

    pub fn retreat_step(&mut self) {
        self.goto_step(self.draft.step as i64 - 1);
    }

    /// Jump to a wizard step, clamped to 1..=3.
    pub fn goto_step(&mut self, n: i64) {
        self.draft.step = clamp_u32(n, MIN_STEP, MAX_STEP);
        debug!("goto_step {} -> {}", n, self.draft.step);
        self.persist();
    }

    pub fn price_breakdown(&self) -> PriceBreakdown {
        compute_price_breakdown(&self.draft)
    }

    /// Snapshot the draft for submission.
    ///
    /// Requires exactly two dishes and a delivery address.
    pub fn build_finalized_order(&self) -> Result<FinalizedOrder> {
        let selected = self.draft.selected_dishes.len();
        if selected != MAX_DISHES {
            return Err(OrderError::PreconditionFailed(format!(
                "select {} dishes before checking out ({} selected)",
                MAX_DISHES, selected
            )));
        }
        let address = self.draft.delivery_address.clone().ok_or_else(|| {
            OrderError::PreconditionFailed("add a delivery address before checking out".to_string())
        })?;

        let pricing = self.price_breakdown();
        Ok(FinalizedOrder {
            dish_names: self.draft.dish_names(),
            base: self.draft.base,
            extra_units: self.draft.extra_units,
            quantity: self.draft.quantity,
            address,
            special_instructions: self.draft.special_instructions.clone(),
            is_special: pricing.has_special_dish,
            total_price: pricing.total,
            pricing,
        })
    }

    /// Restore defaults and clear stored state.
    pub fn reset_draft(&mut self) {
        self.draft = OrderDraft::default();
        if let Err(e) = self.store.remove(DRAFT_STORAGE_KEY) {
            warn!("Could not clear stored draft: {}", e);
        }
        debug!("Draft reset");
    }

    fn persist(&mut self) {
        let result = encode_draft(&self.draft)
            .and_then(|raw| self.store.set(DRAFT_STORAGE_KEY, &raw));
        if let Err(e) = result {
            warn!("Could not persist draft: {}", e);
        }
    }
}

fn clamp_u32(n: i64, min: u32, max: u32) -> u32 {
    n.clamp(min as i64, max as i64) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::store::MemoryDraftStore;

    fn builder() -> OrderBuilder<MemoryDraftStore> {
        OrderBuilder::load(MemoryDraftStore::new())
    }

    fn dish(name: &str) -> DishSelection {
        DishSelection::new(name, false)
    }

    #[test]
    fn test_toggle_removes_selected_dish() {
        let mut b = builder();
        assert_eq!(b.select_dish(&dish("Dal")), DishToggle::Added);
        assert_eq!(b.select_dish(&dish("Dal")), DishToggle::Removed);
        assert!(b.draft().selected_dishes().is_empty());
    }

    #[test]
    fn test_third_dish_ignored() {
        let mut b = builder();
        b.select_dish(&dish("Dal"));
        b.select_dish(&dish("Bhindi"));
        assert_eq!(b.select_dish(&dish("Rajma")), DishToggle::Ignored);
        assert_eq!(b.draft().dish_names(), vec!["Dal".to_string(), "Bhindi".to_string()]);
    }

    #[test]
    fn test_removal_frees_capacity_and_keeps_order() {
        let mut b = builder();
        b.select_dish(&dish("A"));
        b.select_dish(&dish("B"));
        b.select_dish(&dish("A"));
        b.select_dish(&dish("C"));
        assert_eq!(b.draft().dish_names(), vec!["B".to_string(), "C".to_string()]);
    }

    #[test]
    fn test_clamping() {
        let mut b = builder();
        for n in -10..=10 {
            b.set_extra_units(n);
            assert_eq!(b.draft().extra_units() as i64, n.clamp(0, 3));
            b.set_quantity(n);
            assert_eq!(b.draft().quantity() as i64, n.clamp(1, 5));
        }
        b.set_quantity(i64::MAX);
        assert_eq!(b.draft().quantity(), 5);
        b.set_extra_units(i64::MIN);
        assert_eq!(b.draft().extra_units(), 0);
    }

    #[test]
    fn test_step_navigation_is_clamped() {
        let mut b = builder();
        b.retreat_step();
        assert_eq!(b.draft().step(), 1);
        b.advance_step();
        b.advance_step();
        b.advance_step();
        assert_eq!(b.draft().step(), 3);
        b.goto_step(0);
        assert_eq!(b.draft().step(), 1);
        b.goto_step(2);
        assert_eq!(b.draft().step(), 2);
    }

    #[test]
    fn test_every_mutation_persists() {
        let mut b = builder();
        b.select_base(Base::Rice);
        let reloaded = OrderBuilder::load(b.into_store());
        assert_eq!(reloaded.draft().base(), Base::Rice);
    }

    #[test]
    fn test_finalize_requires_two_dishes_and_address() {
        let mut b = builder();
        b.select_dish(&dish("Dal"));
        assert!(matches!(
            b.build_finalized_order(),
            Err(OrderError::PreconditionFailed(_))
        ));

        b.select_dish(&dish("Bhindi"));
        assert!(matches!(
            b.build_finalized_order(),
            Err(OrderError::PreconditionFailed(_))
        ));

        b.set_address(Some(DeliveryAddress::default()));
        let order = b.build_finalized_order().unwrap();
        assert_eq!(order.dish_names.len(), 2);
        assert_eq!(order.total_price, order.pricing.total);
    }

    /// Store whose writes always fail.
    struct FailingDraftStore;

    impl DraftStore for FailingDraftStore {
        fn get(&self, _: &str) -> Result<Option<String>> {
            Ok(None)
        }

        fn set(&mut self, _: &str, _: &str) -> Result<()> {
            Err(OrderError::Io(std::io::Error::other("disk full")))
        }

        fn remove(&mut self, _: &str) -> Result<()> {
            Err(OrderError::Io(std::io::Error::other("read-only")))
        }
    }

    #[test]
    fn test_failed_writes_keep_mutations() {
        let mut b = OrderBuilder::load(FailingDraftStore);

        b.set_quantity(4);
        assert_eq!(b.draft().quantity(), 4);

        assert_eq!(b.select_dish(&dish("Dal")), DishToggle::Added);
        assert_eq!(b.draft().dish_names(), vec!["Dal".to_string()]);

        b.goto_step(2);
        assert_eq!(b.draft().step(), 2);

        b.reset_draft();
        assert_eq!(b.draft(), &OrderDraft::default());
    }

    #[test]
    fn test_reset_clears_store() {
        let mut b = builder();
        b.set_quantity(4);
        b.reset_draft();
        assert_eq!(b.draft(), &OrderDraft::default());

        let store = b.into_store();
        assert!(!store.contains(DRAFT_STORAGE_KEY));
    }
}
