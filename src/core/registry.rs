use crate::app::calculators::{
    autopartes::PartsSearch, bateria::BatteryCalculator, consumo::ConsumptionCalculator,
    depreciacion::DepreciationCalculator, fallos, servicio::ServiceCalculator, tips::TipsLoader,
    CalcContext, Calculator,
};
use crate::domain::ports::{FormSource, View};
use crate::utils::error::{CalcError, Result};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Calculator handlers keyed by identifier. Modules contribute entries; the
/// last registration for an id wins.
#[derive(Default, Clone)]
pub struct CalculatorRegistry {
    handlers: BTreeMap<&'static str, Arc<dyn Calculator>>,
}

impl CalculatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// All built-in calculators; the failure-projection module adds itself and its card.
    pub fn with_defaults(view: &mut dyn View) -> (Self, Arc<fallos::FailureProjection>) {
        let mut registry = Self::new();
        registry.register(Arc::new(ServiceCalculator));
        registry.register(Arc::new(ConsumptionCalculator));
        registry.register(Arc::new(BatteryCalculator));
        registry.register(Arc::new(TipsLoader));
        registry.register(Arc::new(PartsSearch));
        registry.register(Arc::new(DepreciationCalculator));
        let projection = fallos::register(&mut registry, view);
        (registry, projection)
    }

    /// Returns the handler previously registered under the same id.
    pub fn register(&mut self, handler: Arc<dyn Calculator>) -> Option<Arc<dyn Calculator>> {
        let id = handler.id();
        let previous = self.handlers.insert(id, handler);
        if previous.is_some() {
            tracing::debug!("Calculator '{}' replaced", id);
        }
        previous
    }

    pub fn get(&self, id: &str) -> Option<Arc<dyn Calculator>> {
        self.handlers.get(id).cloned()
    }

    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.handlers.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Calculator>> {
        self.handlers.values()
    }

    /// Renders the form of `id`. Unknown ids are a no-op returning false.
    pub fn open(&self, id: &str, view: &mut dyn View) -> bool {
        match self.handlers.get(id) {
            Some(handler) => handler.open(view),
            None => {
                tracing::debug!("No calculator registered for '{}'", id);
                false
            }
        }
    }

    pub async fn submit(
        &self,
        id: &str,
        ctx: &CalcContext,
        form: &dyn FormSource,
        view: &mut dyn View,
    ) -> Result<()> {
        let handler = self.get(id).ok_or_else(|| CalcError::UnknownCalculator {
            id: id.to_string(),
        })?;
        handler.submit(ctx, form, view).await
    }
}
