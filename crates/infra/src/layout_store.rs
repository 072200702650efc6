//! Configuration repository: the published layouts of every case.
//!
//! A case's configurations are published as one immutable [`CaseLayouts`]
//! snapshot. Writers build a new snapshot and swap it in under the write lock,
//! so a reader holding an `Arc<CaseLayouts>` always sees one complete
//! generation, never a mix of old and new.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use bakery_core::{Entity, TenantId};
use bakery_display::{Configuration, ConfigurationId, DisplayCaseId, TimeLabel};

use crate::error::StoreError;

/// Published configurations of one case, in roster order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CaseLayouts {
    configurations: Vec<Arc<Configuration>>,
}

impl CaseLayouts {
    pub fn len(&self) -> usize {
        self.configurations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configurations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Configuration>> + '_ {
        self.configurations.iter()
    }

    /// Owner of the published set. Every configuration of one case shares it.
    pub fn tenant_id(&self) -> Option<TenantId> {
        self.configurations.first().map(|c| c.tenant_id())
    }

    pub fn by_label(&self, label: &TimeLabel) -> Option<&Arc<Configuration>> {
        self.configurations.iter().find(|c| c.time_label() == label)
    }

    pub fn by_id(&self, id: ConfigurationId) -> Option<&Arc<Configuration>> {
        self.configurations.iter().find(|c| c.id_typed() == id)
    }

    /// Labels in roster order.
    pub fn labels(&self) -> impl Iterator<Item = &TimeLabel> + '_ {
        self.configurations.iter().map(|c| c.time_label())
    }
}

/// Storage for generated configurations.
pub trait ConfigurationRepository: Send + Sync {
    /// Insert or replace a single configuration of its case (matched by
    /// label). Other labels of the case are untouched.
    fn save(&self, configuration: Configuration) -> Result<(), StoreError>;

    /// Replace the whole published set of a case in one step and return the
    /// new snapshot. On error the previous set stays published. A case
    /// published by one tenant is never overwritten by another.
    fn replace_case(
        &self,
        case_id: DisplayCaseId,
        configurations: &[Configuration],
    ) -> Result<Arc<CaseLayouts>, StoreError>;

    /// Current snapshot of a case (empty if nothing was ever published).
    fn load(&self, case_id: DisplayCaseId) -> Result<Arc<CaseLayouts>, StoreError>;

    fn load_by_time_of_day(
        &self,
        case_id: DisplayCaseId,
        label: &TimeLabel,
    ) -> Result<Option<Arc<Configuration>>, StoreError>;

    fn load_by_id(&self, id: ConfigurationId) -> Result<Option<Arc<Configuration>>, StoreError>;
}

impl<S> ConfigurationRepository for Arc<S>
where
    S: ConfigurationRepository + ?Sized,
{
    fn save(&self, configuration: Configuration) -> Result<(), StoreError> {
        (**self).save(configuration)
    }

    fn replace_case(
        &self,
        case_id: DisplayCaseId,
        configurations: &[Configuration],
    ) -> Result<Arc<CaseLayouts>, StoreError> {
        (**self).replace_case(case_id, configurations)
    }

    fn load(&self, case_id: DisplayCaseId) -> Result<Arc<CaseLayouts>, StoreError> {
        (**self).load(case_id)
    }

    fn load_by_time_of_day(
        &self,
        case_id: DisplayCaseId,
        label: &TimeLabel,
    ) -> Result<Option<Arc<Configuration>>, StoreError> {
        (**self).load_by_time_of_day(case_id, label)
    }

    fn load_by_id(&self, id: ConfigurationId) -> Result<Option<Arc<Configuration>>, StoreError> {
        (**self).load_by_id(id)
    }
}

#[derive(Debug, Default)]
struct LayoutState {
    cases: HashMap<DisplayCaseId, Arc<CaseLayouts>>,
    by_id: HashMap<ConfigurationId, DisplayCaseId>,
}

/// In-memory configuration repository.
///
/// Intended for tests/dev. Every write validates the configurations it is
/// handed and rejects sets that would leave a case inconsistent.
#[derive(Debug, Default)]
pub struct InMemoryLayoutStore {
    state: RwLock<LayoutState>,
}

impl InMemoryLayoutStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn check(case_id: DisplayCaseId, configuration: &Configuration) -> Result<(), StoreError> {
    if configuration.case_id() != case_id {
        return Err(StoreError::Rejected(format!(
            "configuration {} belongs to case {}, not {case_id}",
            configuration.id_typed(),
            configuration.case_id()
        )));
    }
    configuration
        .validate()
        .map_err(|e| StoreError::Rejected(e.to_string()))
}

impl ConfigurationRepository for InMemoryLayoutStore {
    fn save(&self, configuration: Configuration) -> Result<(), StoreError> {
        let case_id = configuration.case_id();
        check(case_id, &configuration)?;

        let mut state = self.state.write().map_err(|_| StoreError::poisoned("layout store"))?;

        let mut configurations = state
            .cases
            .get(&case_id)
            .map(|current| current.configurations.clone())
            .unwrap_or_default();

        if configurations
            .first()
            .is_some_and(|other| other.tenant_id() != configuration.tenant_id())
        {
            return Err(StoreError::Rejected(format!(
                "case {case_id} already holds another tenant's configurations"
            )));
        }

        let id = configuration.id_typed();
        let configuration = Arc::new(configuration);
        match configurations
            .iter_mut()
            .find(|c| c.time_label() == configuration.time_label())
        {
            Some(slot) => *slot = configuration,
            None => configurations.push(configuration),
        }

        state.by_id.insert(id, case_id);
        state
            .cases
            .insert(case_id, Arc::new(CaseLayouts { configurations }));
        Ok(())
    }

    fn replace_case(
        &self,
        case_id: DisplayCaseId,
        configurations: &[Configuration],
    ) -> Result<Arc<CaseLayouts>, StoreError> {
        let Some(tenant_id) = configurations.first().map(|c| c.tenant_id()) else {
            return Err(StoreError::Rejected(format!(
                "empty configuration set for case {case_id}"
            )));
        };
        let mut labels = HashSet::new();
        for configuration in configurations {
            check(case_id, configuration)?;
            if !labels.insert(configuration.time_label().as_str()) {
                return Err(StoreError::Rejected(format!(
                    "time label {} appears twice",
                    configuration.time_label()
                )));
            }
        }
        if configurations.iter().any(|c| c.tenant_id() != tenant_id) {
            return Err(StoreError::Rejected(
                "configurations of one case span several tenants".to_string(),
            ));
        }

        let snapshot = Arc::new(CaseLayouts {
            configurations: configurations.iter().cloned().map(Arc::new).collect(),
        });

        let mut state = self.state.write().map_err(|_| StoreError::poisoned("layout store"))?;
        let previous = state.cases.get(&case_id).cloned();
        if previous
            .as_ref()
            .and_then(|p| p.tenant_id())
            .is_some_and(|owner| owner != tenant_id)
        {
            return Err(StoreError::Rejected(format!(
                "case {case_id} already holds another tenant's configurations"
            )));
        }
        if let Some(previous) = previous {
            for old in previous.iter() {
                state.by_id.remove(&old.id_typed());
            }
        }
        for configuration in snapshot.iter() {
            state.by_id.insert(configuration.id_typed(), case_id);
        }
        state.cases.insert(case_id, Arc::clone(&snapshot));

        Ok(snapshot)
    }

    fn load(&self, case_id: DisplayCaseId) -> Result<Arc<CaseLayouts>, StoreError> {
        let state = self.state.read().map_err(|_| StoreError::poisoned("layout store"))?;
        Ok(state.cases.get(&case_id).cloned().unwrap_or_default())
    }

    fn load_by_time_of_day(
        &self,
        case_id: DisplayCaseId,
        label: &TimeLabel,
    ) -> Result<Option<Arc<Configuration>>, StoreError> {
        Ok(self.load(case_id)?.by_label(label).cloned())
    }

    fn load_by_id(&self, id: ConfigurationId) -> Result<Option<Arc<Configuration>>, StoreError> {
        let state = self.state.read().map_err(|_| StoreError::poisoned("layout store"))?;
        Ok(state
            .by_id
            .get(&id)
            .and_then(|case_id| state.cases.get(case_id))
            .and_then(|layouts| layouts.by_id(id))
            .cloned())
    }
}
