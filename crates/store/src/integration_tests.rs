//! Integration tests for the store: tenancy scoping, catalog uniqueness,
//! the ledger commit path, cascade deletes, and the concurrent-overdraw
//! guarantee.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use stockledger_catalog::{ProductDraft, ProductFilter, ProductPatch};
    use stockledger_core::{BusinessId, DomainError, PrincipalId};
    use stockledger_ledger::{NewTransaction, TransactionType};
    use stockledger_tenancy::{BusinessPatch, NewBusiness};

    use crate::{BusinessSelection, InventoryStore};

    fn store_with_business(owner: PrincipalId, name: &str) -> (InventoryStore, BusinessId) {
        let store = InventoryStore::new();
        let business = store
            .create_business(owner, NewBusiness::new(name, "12 Main St").unwrap())
            .unwrap();
        (store, business.id())
    }

    fn widget_draft(sku: &str, quantity: u64, reorder_level: u64) -> ProductDraft {
        ProductDraft::new("Widget", sku, "tools", quantity, reorder_level, "pcs", None).unwrap()
    }

    #[test]
    fn ledger_scenario_end_to_end() {
        let owner = PrincipalId::new();
        let (store, acme) = store_with_business(owner, "Acme");
        let product = store
            .create_product(owner, acme, widget_draft("WID1", 50, 10))
            .unwrap();
        let pid = product.id();

        // In 20 -> 70.
        store
            .record_transaction(
                owner,
                acme,
                NewTransaction::new(pid, TransactionType::In, 20).unwrap(),
            )
            .unwrap();
        assert_eq!(store.get_product(owner, acme, pid).unwrap().current_quantity(), 70);

        // Out 80 -> rejected, nothing changes.
        let err = store
            .record_transaction(
                owner,
                acme,
                NewTransaction::new(pid, TransactionType::Out, 80).unwrap(),
            )
            .unwrap_err();
        assert_eq!(err, DomainError::InsufficientStock { available: 70 });
        assert_eq!(store.get_product(owner, acme, pid).unwrap().current_quantity(), 70);
        assert_eq!(store.list_transactions(owner, acme, None).unwrap().len(), 1);

        // Out 70 -> 0, and the product is now low-stock (0 <= 10).
        store
            .record_transaction(
                owner,
                acme,
                NewTransaction::new(pid, TransactionType::Out, 70).unwrap(),
            )
            .unwrap();
        assert_eq!(store.get_product(owner, acme, pid).unwrap().current_quantity(), 0);

        let low = store.low_stock_products(owner, acme).unwrap();
        assert!(low.iter().any(|p| p.id() == pid));
    }

    #[test]
    fn foreign_owner_sees_not_found_everywhere() {
        let owner = PrincipalId::new();
        let intruder = PrincipalId::new();
        let (store, acme) = store_with_business(owner, "Acme");
        let product = store
            .create_product(owner, acme, widget_draft("WID1", 5, 0))
            .unwrap();

        assert_eq!(store.get_business(intruder, acme).unwrap_err(), DomainError::NotFound);
        assert_eq!(
            store.get_product(intruder, acme, product.id()).unwrap_err(),
            DomainError::NotFound
        );
        assert_eq!(
            store
                .list_products(intruder, acme, &ProductFilter::default())
                .unwrap_err(),
            DomainError::NotFound
        );
        assert_eq!(
            store
                .record_transaction(
                    intruder,
                    acme,
                    NewTransaction::new(product.id(), TransactionType::In, 1).unwrap(),
                )
                .unwrap_err(),
            DomainError::NotFound
        );
        assert_eq!(store.delete_business(intruder, acme).unwrap_err(), DomainError::NotFound);

        // Nothing leaked, nothing changed.
        assert_eq!(
            store.get_product(owner, acme, product.id()).unwrap().current_quantity(),
            5
        );
    }

    #[test]
    fn business_names_are_globally_unique() {
        let owner = PrincipalId::new();
        let (store, _) = store_with_business(owner, "Acme");

        // Even a different principal cannot reuse the name.
        let err = store
            .create_business(PrincipalId::new(), NewBusiness::new("Acme", "").unwrap())
            .unwrap_err();
        assert_eq!(err, DomainError::DuplicateName);
    }

    #[test]
    fn update_business_renames_but_cannot_take_an_existing_name() {
        let owner = PrincipalId::new();
        let (store, acme) = store_with_business(owner, "Acme");
        let globex = store
            .create_business(owner, NewBusiness::new("Globex", "1 Globex Way").unwrap())
            .unwrap();

        // Renaming onto another business's name is a conflict.
        let err = store
            .update_business(
                owner,
                globex.id(),
                BusinessPatch::new(Some("Acme".into()), None).unwrap(),
            )
            .unwrap_err();
        assert_eq!(err, DomainError::DuplicateName);

        // Re-submitting its own name is not: the uniqueness check excludes
        // the business being edited.
        let unchanged = store
            .update_business(
                owner,
                globex.id(),
                BusinessPatch::new(Some("Globex".into()), Some("2 Globex Way".into())).unwrap(),
            )
            .unwrap();
        assert_eq!(unchanged.name(), "Globex");
        assert_eq!(unchanged.address(), "2 Globex Way");

        let renamed = store
            .update_business(
                owner,
                globex.id(),
                BusinessPatch::new(Some("Globex Corp".into()), None).unwrap(),
            )
            .unwrap();
        assert_eq!(renamed.name(), "Globex Corp");

        // Foreign owners get NotFound, same as every other scoped operation.
        let err = store
            .update_business(
                PrincipalId::new(),
                acme,
                BusinessPatch::new(Some("Hijacked".into()), None).unwrap(),
            )
            .unwrap_err();
        assert_eq!(err, DomainError::NotFound);
        assert_eq!(store.get_business(owner, acme).unwrap().name(), "Acme");
    }

    #[test]
    fn sku_unique_per_business_but_reusable_across_businesses() {
        let owner = PrincipalId::new();
        let (store, acme) = store_with_business(owner, "Acme");
        store.create_product(owner, acme, widget_draft("WID1", 0, 0)).unwrap();

        let err = store
            .create_product(owner, acme, widget_draft("WID1", 0, 0))
            .unwrap_err();
        assert_eq!(err, DomainError::DuplicateSku);

        let globex = store
            .create_business(owner, NewBusiness::new("Globex", "").unwrap())
            .unwrap();
        assert!(store.create_product(owner, globex.id(), widget_draft("WID1", 0, 0)).is_ok());
    }

    #[test]
    fn update_cannot_steal_another_products_sku() {
        let owner = PrincipalId::new();
        let (store, acme) = store_with_business(owner, "Acme");
        store.create_product(owner, acme, widget_draft("WID1", 0, 0)).unwrap();
        let second = store
            .create_product(owner, acme, widget_draft("WID2", 0, 0))
            .unwrap();

        let patch = ProductPatch::new(None, Some("WID1".into()), None, None, None, None, None)
            .unwrap();
        let err = store
            .update_product(owner, acme, second.id(), patch)
            .unwrap_err();
        assert_eq!(err, DomainError::DuplicateSku);

        // Keeping its own SKU in a full-field edit is fine.
        let keep = ProductPatch::new(None, Some("WID2".into()), None, None, None, None, None)
            .unwrap();
        assert!(store.update_product(owner, acme, second.id(), keep).is_ok());
    }

    #[test]
    fn deleting_a_business_cascades_to_products_and_transactions() {
        let owner = PrincipalId::new();
        let (store, acme) = store_with_business(owner, "Acme");
        let product = store
            .create_product(owner, acme, widget_draft("WID1", 10, 0))
            .unwrap();
        store
            .record_transaction(
                owner,
                acme,
                NewTransaction::new(product.id(), TransactionType::Out, 3).unwrap(),
            )
            .unwrap();

        store.delete_business(owner, acme).unwrap();

        assert_eq!(store.get_business(owner, acme).unwrap_err(), DomainError::NotFound);
        assert_eq!(
            store.get_product(owner, acme, product.id()).unwrap_err(),
            DomainError::NotFound
        );
        assert_eq!(
            store.list_transactions(owner, acme, None).unwrap_err(),
            DomainError::NotFound
        );
    }

    #[test]
    fn deleting_a_product_cascades_to_its_transactions() {
        let owner = PrincipalId::new();
        let (store, acme) = store_with_business(owner, "Acme");
        let keep = store.create_product(owner, acme, widget_draft("KEEP1", 10, 0)).unwrap();
        let gone = store.create_product(owner, acme, widget_draft("GONE1", 10, 0)).unwrap();

        for product in [&keep, &gone] {
            store
                .record_transaction(
                    owner,
                    acme,
                    NewTransaction::new(product.id(), TransactionType::Out, 1).unwrap(),
                )
                .unwrap();
        }

        store.delete_product(owner, acme, gone.id()).unwrap();

        let remaining = store.list_transactions(owner, acme, None).unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].product_id(), keep.id());
    }

    #[test]
    fn transactions_list_newest_first_with_type_filter() {
        let owner = PrincipalId::new();
        let (store, acme) = store_with_business(owner, "Acme");
        let product = store
            .create_product(owner, acme, widget_draft("WID1", 100, 0))
            .unwrap();

        for (r#type, quantity) in [
            (TransactionType::In, 5),
            (TransactionType::Out, 2),
            (TransactionType::In, 7),
        ] {
            store
                .record_transaction(
                    owner,
                    acme,
                    NewTransaction::new(product.id(), r#type, quantity).unwrap(),
                )
                .unwrap();
        }

        let all = store.list_transactions(owner, acme, None).unwrap();
        assert_eq!(all.len(), 3);
        assert!(all.windows(2).all(|w| w[0].created_at() >= w[1].created_at()));

        let inbound = store
            .list_transactions(owner, acme, Some(TransactionType::In))
            .unwrap();
        assert_eq!(inbound.len(), 2);
        assert!(inbound.iter().all(|t| t.transaction_type() == TransactionType::In));
    }

    #[test]
    fn concurrent_outbound_requests_never_overdraw() {
        let owner = PrincipalId::new();
        let (store, acme) = store_with_business(owner, "Acme");
        let store = Arc::new(store);
        let product = store
            .create_product(owner, acme, widget_draft("WID1", 100, 0))
            .unwrap();
        let pid = product.id();

        // 8 workers each try to take 30 out of 100: exactly 3 can succeed.
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    store.record_transaction(
                        owner,
                        acme,
                        NewTransaction::new(pid, TransactionType::Out, 30).unwrap(),
                    )
                })
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let successes = results.iter().filter(|r| r.is_ok()).count();
        let insufficient = results
            .iter()
            .filter(|r| matches!(r, Err(DomainError::InsufficientStock { .. })))
            .count();

        assert_eq!(successes, 3);
        assert_eq!(insufficient, 5);
        assert_eq!(store.get_product(owner, acme, pid).unwrap().current_quantity(), 10);
        assert_eq!(store.list_transactions(owner, acme, None).unwrap().len(), 3);
    }

    #[test]
    fn current_business_resolution_clears_stale_selection_once() {
        let owner = PrincipalId::new();
        let store = InventoryStore::new();

        assert_eq!(store.resolve_current_business(owner, None), BusinessSelection::NoBusiness);

        let first = store
            .create_business(owner, NewBusiness::new("Acme", "").unwrap())
            .unwrap();
        let second = store
            .create_business(owner, NewBusiness::new("Globex", "").unwrap())
            .unwrap();

        // Explicit selection wins.
        assert_eq!(
            store.resolve_current_business(owner, Some(second.id())),
            BusinessSelection::Selected(second.clone())
        );

        // No selection: first business auto-selected.
        assert_eq!(
            store.resolve_current_business(owner, None),
            BusinessSelection::Selected(first.clone())
        );

        // Stale selection (deleted) falls back to the first remaining one.
        store.delete_business(owner, second.id()).unwrap();
        assert_eq!(
            store.resolve_current_business(owner, Some(second.id())),
            BusinessSelection::Selected(first.clone())
        );

        // A selection owned by someone else behaves exactly like a stale one.
        let foreign = store
            .create_business(PrincipalId::new(), NewBusiness::new("Initech", "").unwrap())
            .unwrap();
        assert_eq!(
            store.resolve_current_business(owner, Some(foreign.id())),
            BusinessSelection::Selected(first)
        );
    }
}
