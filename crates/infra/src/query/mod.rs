//! Query façade: read-only lookups over published layouts.
//!
//! Every lookup names its tenant. A record of another tenant is reported as
//! not found, exactly like a record that does not exist. Nothing here runs
//! allocation; reads only see what a regeneration has published.

mod views;

use std::collections::HashMap;
use std::sync::Arc;

use bakery_catalog::{ProductId, ProductView};
use bakery_core::{Entity, TenantId};
use bakery_display::{Configuration, ConfigurationId, DisplayCase, DisplayCaseId, Slot, TimeLabel};

use crate::catalog::CatalogProvider;
use crate::error::PlannerError;
use crate::layout_store::{CaseLayouts, ConfigurationRepository};
use crate::read_model::TenantStore;

pub use views::{CaseDetail, CaseSummary, ConfigurationView, SlotView};

pub struct QueryFacade<S, C, R> {
    cases: S,
    catalog: C,
    layouts: R,
}

impl<S, C, R> QueryFacade<S, C, R>
where
    S: TenantStore<DisplayCaseId, DisplayCase>,
    C: CatalogProvider,
    R: ConfigurationRepository,
{
    pub fn new(cases: S, catalog: C, layouts: R) -> Self {
        Self {
            cases,
            catalog,
            layouts,
        }
    }

    pub fn case_by_id(&self, tenant_id: TenantId, case_id: DisplayCaseId) -> Result<DisplayCase, PlannerError> {
        self.cases
            .get(tenant_id, &case_id)?
            .ok_or_else(|| PlannerError::not_found(format!("display case {case_id}")))
    }

    pub fn configuration_by_id(
        &self,
        tenant_id: TenantId,
        id: ConfigurationId,
    ) -> Result<Arc<Configuration>, PlannerError> {
        self.layouts
            .load_by_id(id)?
            .filter(|c| c.tenant_id() == tenant_id)
            .ok_or_else(|| PlannerError::not_found(format!("configuration {id}")))
    }

    /// The configuration published for `label` on this case. Labels of other
    /// cases are never consulted.
    pub fn configuration_by_time_of_day(
        &self,
        tenant_id: TenantId,
        case_id: DisplayCaseId,
        label: &str,
    ) -> Result<Arc<Configuration>, PlannerError> {
        self.case_by_id(tenant_id, case_id)?;
        let label = TimeLabel::new(label)?;
        self.layouts
            .load_by_time_of_day(case_id, &label)?
            .filter(|c| c.tenant_id() == tenant_id)
            .ok_or_else(|| PlannerError::not_found(format!("configuration {label} of case {case_id}")))
    }

    /// Slot at `(row, column)` of a published configuration.
    pub fn slot(
        &self,
        tenant_id: TenantId,
        case_id: DisplayCaseId,
        label: &str,
        row: u32,
        column: u32,
    ) -> Result<Slot, PlannerError> {
        let configuration = self.configuration_by_time_of_day(tenant_id, case_id, label)?;
        Ok(configuration.get_slot(row, column)?.clone())
    }

    /// Catalog detail (display defaults applied) of the product in `slot`.
    ///
    /// An empty slot resolves to `None`. A reference to a product the catalog
    /// no longer has is `NotFound`.
    pub fn resolve_slot_product(
        &self,
        tenant_id: TenantId,
        slot: &Slot,
    ) -> Result<Option<ProductView>, PlannerError> {
        let Some(product_id) = slot.product_id else {
            return Ok(None);
        };
        self.catalog
            .product(tenant_id, &product_id)?
            .map(|p| Some(p.view()))
            .ok_or_else(|| PlannerError::not_found(format!("product {product_id}")))
    }

    /// All cases of the tenant with their published labels.
    pub fn list_cases(&self, tenant_id: TenantId) -> Result<Vec<CaseSummary>, PlannerError> {
        self.cases
            .list(tenant_id)?
            .iter()
            .map(|case| {
                let layouts = self.published(tenant_id, case.id_typed())?;
                summarize(case, &layouts)
            })
            .collect()
    }

    pub fn case_detail(&self, tenant_id: TenantId, case_id: DisplayCaseId) -> Result<CaseDetail, PlannerError> {
        let case = self.case_by_id(tenant_id, case_id)?;
        let layouts = self.published(tenant_id, case_id)?;
        let products = self.product_views(tenant_id)?;

        Ok(CaseDetail {
            case: summarize(&case, &layouts)?,
            configurations: layouts
                .iter()
                .map(|c| configuration_view(c, &products))
                .collect(),
        })
    }

    pub fn configuration_view(
        &self,
        tenant_id: TenantId,
        case_id: DisplayCaseId,
        label: &str,
    ) -> Result<ConfigurationView, PlannerError> {
        let configuration = self.configuration_by_time_of_day(tenant_id, case_id, label)?;
        let products = self.product_views(tenant_id)?;
        Ok(configuration_view(&configuration, &products))
    }

    /// Catalog entries in catalog order, display defaults applied.
    pub fn catalog_entries(&self, tenant_id: TenantId) -> Result<Vec<ProductView>, PlannerError> {
        Ok(self
            .catalog
            .products_for_tenant(tenant_id)?
            .iter()
            .map(|p| p.view())
            .collect())
    }

    /// One snapshot of the case's layouts; empty unless `tenant_id` owns it.
    fn published(&self, tenant_id: TenantId, case_id: DisplayCaseId) -> Result<Arc<CaseLayouts>, PlannerError> {
        let layouts = self.layouts.load(case_id)?;
        if layouts.tenant_id().is_some_and(|owner| owner != tenant_id) {
            return Ok(Arc::default());
        }
        Ok(layouts)
    }

    fn product_views(&self, tenant_id: TenantId) -> Result<HashMap<ProductId, ProductView>, PlannerError> {
        Ok(self
            .catalog
            .products_for_tenant(tenant_id)?
            .iter()
            .map(|p| (*p.id(), p.view()))
            .collect())
    }
}

fn summarize(case: &DisplayCase, layouts: &CaseLayouts) -> Result<CaseSummary, PlannerError> {
    let dimensions = case.dimensions()?;
    Ok(CaseSummary {
        id: case.id_typed(),
        name: case.name().to_string(),
        description: case.description().to_string(),
        layout_type: case.layout_type(),
        rows: dimensions.rows(),
        columns: dimensions.columns(),
        time_labels: layouts.labels().cloned().collect(),
    })
}

fn configuration_view(
    configuration: &Configuration,
    products: &HashMap<ProductId, ProductView>,
) -> ConfigurationView {
    ConfigurationView {
        id: configuration.id_typed(),
        case_id: configuration.case_id(),
        time_label: configuration.time_label().clone(),
        layout_metadata: configuration.layout_metadata().clone(),
        filled_count: configuration.filled_count(),
        slots: configuration
            .slots()
            .iter()
            .map(|slot| SlotView {
                id: slot.id,
                row: slot.row,
                column: slot.column,
                product_id: slot.product_id,
                product: slot.product_id.and_then(|id| products.get(&id).cloned()),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::InMemoryCatalog;
    use crate::layout_store::InMemoryLayoutStore;
    use crate::read_model::InMemoryTenantStore;
    use bakery_catalog::{DEFAULT_CATEGORY, DEFAULT_ICON_CLASS, Product};
    use bakery_display::{CaseDimensions, FillPolicy, LayoutError, generate};
    use std::sync::Mutex;

    use crate::error::StoreError;

    /// Publishes `next` right after the first `load` returns, as a writer
    /// racing the reader would.
    struct RacingLayouts {
        inner: InMemoryLayoutStore,
        next: Mutex<Option<Vec<Configuration>>>,
    }

    impl ConfigurationRepository for RacingLayouts {
        fn save(&self, configuration: Configuration) -> Result<(), StoreError> {
            self.inner.save(configuration)
        }

        fn replace_case(
            &self,
            case_id: DisplayCaseId,
            configurations: &[Configuration],
        ) -> Result<Arc<CaseLayouts>, StoreError> {
            self.inner.replace_case(case_id, configurations)
        }

        fn load(&self, case_id: DisplayCaseId) -> Result<Arc<CaseLayouts>, StoreError> {
            let snapshot = self.inner.load(case_id)?;
            if let Some(next) = self.next.lock().unwrap().take() {
                self.inner.replace_case(case_id, &next)?;
            }
            Ok(snapshot)
        }

        fn load_by_time_of_day(
            &self,
            case_id: DisplayCaseId,
            label: &TimeLabel,
        ) -> Result<Option<Arc<Configuration>>, StoreError> {
            self.inner.load_by_time_of_day(case_id, label)
        }

        fn load_by_id(&self, id: ConfigurationId) -> Result<Option<Arc<Configuration>>, StoreError> {
            self.inner.load_by_id(id)
        }
    }

    struct Fixture {
        tenant: TenantId,
        case: DisplayCase,
        croissant: Product,
        facade: QueryFacade<
            Arc<InMemoryTenantStore<DisplayCaseId, DisplayCase>>,
            Arc<InMemoryCatalog>,
            Arc<InMemoryLayoutStore>,
        >,
    }

    fn fixture() -> Fixture {
        let tenant = TenantId::new();
        let cases = Arc::new(InMemoryTenantStore::new());
        let catalog = Arc::new(InMemoryCatalog::new());
        let layouts = Arc::new(InMemoryLayoutStore::new());

        let croissant = Product::new(tenant, ProductId::generate(), "Croissant")
            .unwrap()
            .with_display_name("Buttercroissant");
        let brot = Product::new(tenant, ProductId::generate(), "Brot")
            .unwrap()
            .with_priority_rank(1)
            .with_category("Brot");
        catalog.upsert(croissant.clone()).unwrap();
        catalog.upsert(brot.clone()).unwrap();

        let case = DisplayCase::new(
            tenant,
            DisplayCaseId::generate(),
            "Haupttheke",
            CaseDimensions::new(2, 2).unwrap(),
        )
        .unwrap()
        .with_description("Zentrale Verkaufstheke");
        cases.upsert(tenant, case.id_typed(), case.clone()).unwrap();

        let policy = FillPolicy::new().with_count("06:00", 1).with_count("11:00", 4);
        let configurations = generate(&case, ["06:00", "11:00"], &[croissant.clone(), brot], &policy).unwrap();
        layouts.replace_case(case.id_typed(), &configurations).unwrap();

        Fixture {
            tenant,
            case,
            croissant,
            facade: QueryFacade::new(cases, catalog, layouts),
        }
    }

    #[test]
    fn case_lookup_is_tenant_scoped() {
        let f = fixture();
        assert_eq!(f.facade.case_by_id(f.tenant, f.case.id_typed()).unwrap(), f.case);
        assert!(matches!(
            f.facade.case_by_id(TenantId::new(), f.case.id_typed()),
            Err(PlannerError::NotFound(_))
        ));
    }

    #[test]
    fn configuration_by_label_and_id() {
        let f = fixture();
        let morning = f
            .facade
            .configuration_by_time_of_day(f.tenant, f.case.id_typed(), "06:00")
            .unwrap();
        assert_eq!(morning.filled_count(), 1);

        let by_id = f
            .facade
            .configuration_by_id(f.tenant, morning.id_typed())
            .unwrap();
        assert_eq!(by_id, morning);

        assert!(matches!(
            f.facade.configuration_by_id(TenantId::new(), morning.id_typed()),
            Err(PlannerError::NotFound(_))
        ));
        assert!(matches!(
            f.facade
                .configuration_by_time_of_day(f.tenant, f.case.id_typed(), "17:00"),
            Err(PlannerError::NotFound(_))
        ));
    }

    #[test]
    fn slot_access_reports_out_of_bounds() {
        let f = fixture();
        let slot = f.facade.slot(f.tenant, f.case.id_typed(), "06:00", 0, 0).unwrap();
        assert_eq!(slot.product_id, Some(*f.croissant.id()));

        assert!(matches!(
            f.facade.slot(f.tenant, f.case.id_typed(), "06:00", 2, 0),
            Err(PlannerError::Layout(LayoutError::OutOfBounds { row: 2, .. }))
        ));
    }

    #[test]
    fn resolves_slot_products_with_defaults() {
        let f = fixture();
        let filled = f.facade.slot(f.tenant, f.case.id_typed(), "06:00", 0, 0).unwrap();
        let view = f.facade.resolve_slot_product(f.tenant, &filled).unwrap().unwrap();
        assert_eq!(view.display_name, "Buttercroissant");
        assert_eq!(view.icon_class, DEFAULT_ICON_CLASS);
        assert_eq!(view.category, DEFAULT_CATEGORY);

        let empty = f.facade.slot(f.tenant, f.case.id_typed(), "06:00", 1, 1).unwrap();
        assert_eq!(f.facade.resolve_slot_product(f.tenant, &empty).unwrap(), None);

        assert!(matches!(
            f.facade.resolve_slot_product(TenantId::new(), &filled),
            Err(PlannerError::NotFound(_))
        ));
    }

    #[test]
    fn list_and_detail_shapes() {
        let f = fixture();
        let cases = f.facade.list_cases(f.tenant).unwrap();
        assert_eq!(cases.len(), 1);
        assert_eq!(cases[0].name, "Haupttheke");
        assert_eq!(cases[0].time_labels.len(), 2);
        assert!(f.facade.list_cases(TenantId::new()).unwrap().is_empty());

        let detail = f.facade.case_detail(f.tenant, f.case.id_typed()).unwrap();
        assert_eq!(detail.configurations.len(), 2);
        let lunch = &detail.configurations[1];
        assert_eq!(lunch.time_label.as_str(), "11:00");
        // Only two products exist, so two of four cells stay empty.
        assert_eq!(lunch.filled_count, 2);
        assert_eq!(lunch.slots.len(), 4);
        assert_eq!(
            lunch.slots[0].product.as_ref().map(|p| p.name.as_str()),
            Some("Croissant")
        );
        assert!(lunch.slots[3].product.is_none());

        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["name"], "Haupttheke");
        assert_eq!(json["layout_type"], "grid");
        assert_eq!(json["configurations"][0]["slots"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn catalog_entries_apply_defaults_in_catalog_order() {
        let f = fixture();
        let entries = f.facade.catalog_entries(f.tenant).unwrap();
        let names: Vec<_> = entries.iter().map(|e| e.display_name.as_str()).collect();
        assert_eq!(names, vec!["Buttercroissant", "Brot"]);
        assert_eq!(entries[1].category, "Brot");
    }

    #[test]
    fn configuration_view_matches_label() {
        let f = fixture();
        let view = f
            .facade
            .configuration_view(f.tenant, f.case.id_typed(), "06:00")
            .unwrap();
        assert_eq!(view.filled_count, 1);
        assert_eq!(view.slots[0].product.as_ref().unwrap().id, *f.croissant.id());
    }

    #[test]
    fn case_detail_reads_one_generation() {
        let tenant = TenantId::new();
        let cases = Arc::new(InMemoryTenantStore::new());
        let catalog = Arc::new(InMemoryCatalog::new());
        let brot = Product::new(tenant, ProductId::generate(), "Brot").unwrap();
        catalog.upsert(brot.clone()).unwrap();

        let case = DisplayCase::new(
            tenant,
            DisplayCaseId::generate(),
            "Theke",
            CaseDimensions::new(1, 2).unwrap(),
        )
        .unwrap();
        cases.upsert(tenant, case.id_typed(), case.clone()).unwrap();

        let products = [brot];
        let current = generate(&case, ["06:00", "11:00"], &products, &FillPolicy::new()).unwrap();
        let next = generate(&case, ["17:00"], &products, &FillPolicy::new()).unwrap();
        let layouts = RacingLayouts {
            inner: InMemoryLayoutStore::new(),
            next: Mutex::new(Some(next)),
        };
        layouts.replace_case(case.id_typed(), &current).unwrap();
        let facade = QueryFacade::new(cases, catalog, layouts);

        let detail = facade.case_detail(tenant, case.id_typed()).unwrap();
        let published: Vec<_> = detail.configurations.iter().map(|c| c.time_label.clone()).collect();
        assert_eq!(published, detail.case.time_labels);
        assert_eq!(published.len(), 2);

        // The racing write did land; the next read sees it whole.
        let later = facade.case_detail(tenant, case.id_typed()).unwrap();
        assert_eq!(later.case.time_labels.len(), 1);
        assert_eq!(later.configurations.len(), 1);
    }

    #[test]
    fn layouts_of_another_tenant_are_never_served() {
        let f = fixture();
        let layouts = f.facade.layouts.clone();
        let intruder = TenantId::new();
        let same_id = DisplayCase::new(
            intruder,
            f.case.id_typed(),
            "Fremd",
            CaseDimensions::new(2, 2).unwrap(),
        )
        .unwrap();
        f.facade
            .cases
            .upsert(intruder, same_id.id_typed(), same_id.clone())
            .unwrap();

        assert!(matches!(
            f.facade
                .configuration_by_time_of_day(intruder, f.case.id_typed(), "06:00"),
            Err(PlannerError::NotFound(_))
        ));
        let detail = f.facade.case_detail(intruder, f.case.id_typed()).unwrap();
        assert!(detail.configurations.is_empty());
        assert!(detail.case.time_labels.is_empty());

        let theirs = generate(&same_id, ["06:00"], &[], &FillPolicy::new()).unwrap();
        assert!(layouts.replace_case(f.case.id_typed(), &theirs).is_err());
        let ours = f
            .facade
            .configuration_by_time_of_day(f.tenant, f.case.id_typed(), "06:00")
            .unwrap();
        assert_eq!(ours.tenant_id(), f.tenant);
    }
}
