//! Gateway Integration Tests
//!
//! Drives the gateway against the in-memory contract.

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use crate::config::{GatewayConfig, Network, CONTRACT_ADDRESS_KEY, NETWORK_KEY};
    use crate::error::{ConfigError, GatewayError, Operation, Stage, TransportError, ValidationError};
    use crate::gateway::TodoGateway;
    use crate::item::MAX_TASK_LENGTH;
    use crate::memory::{MemoryLedger, RecordedCall};
    use crate::payload::{AccountAddress, EntryArgument};
    use crate::transport::{LedgerClient, TransactionSigner};
    use serde_json::json;

    const CONTRACT: &str = "0xc0ffee";
    const ALICE: &str = "0xa11ce";

    fn config() -> GatewayConfig {
        GatewayConfig::new(Network::Local, CONTRACT).expect("config")
    }

    fn setup_connected() -> (Rc<MemoryLedger>, TodoGateway) {
        let ledger = Rc::new(MemoryLedger::new(CONTRACT));
        let gateway = TodoGateway::new(config(), Rc::clone(&ledger) as Rc<dyn LedgerClient>).with_signer(
            Some(Rc::clone(&ledger) as Rc<dyn TransactionSigner>),
            Some(AccountAddress::parse(ALICE).unwrap()),
        );
        (ledger, gateway)
    }

    fn setup_read_only() -> (Rc<MemoryLedger>, TodoGateway) {
        let ledger = Rc::new(MemoryLedger::new(CONTRACT));
        let gateway = TodoGateway::new(config(), Rc::clone(&ledger) as Rc<dyn LedgerClient>);
        (ledger, gateway)
    }

    // ========================
    // Construction
    // ========================

    #[test]
    fn test_unset_contract_address_is_config_error() {
        let err: GatewayError = GatewayConfig::from_lookup(|key| (key == NETWORK_KEY).then(|| "testnet".to_string()))
            .map_err(GatewayError::from)
            .unwrap_err();
        assert_eq!(err, GatewayError::Config(ConfigError::MissingSetting { key: CONTRACT_ADDRESS_KEY }));
        assert!(err.to_string().contains(CONTRACT_ADDRESS_KEY));
    }

    #[test]
    fn test_accessors_reflect_config() {
        let (_, gateway) = setup_connected();
        assert!(gateway.is_configured());
        assert!(gateway.has_signer());
        assert_eq!(gateway.network(), Network::Local);
        assert_eq!(gateway.contract_address(), CONTRACT);
        assert_eq!(gateway.account().unwrap().as_str(), ALICE);
    }

    // ========================
    // Writes
    // ========================

    #[tokio::test]
    async fn test_create_submits_trimmed_task_once() {
        let (ledger, gateway) = setup_connected();

        gateway.create("   Water the plants \n").await.unwrap();

        let submissions = ledger.submissions();
        assert_eq!(submissions.len(), 1);
        let txn = &submissions[0];
        assert_eq!(txn.function.to_string(), "0xc0ffee::todo_list::create_todo");
        assert_eq!(txn.sender.as_str(), ALICE);
        assert!(txn.type_arguments.is_empty());
        assert_eq!(
            txn.function_arguments.last(),
            Some(&EntryArgument::String("Water the plants".into()))
        );
    }

    #[tokio::test]
    async fn test_create_waits_for_submitted_hash() {
        let (ledger, gateway) = setup_connected();

        let hash = gateway.create("read a book").await.unwrap();

        let calls = ledger.calls();
        assert!(matches!(calls[0], RecordedCall::Submit(_)));
        assert_eq!(calls[1], RecordedCall::Wait(hash));
    }

    #[tokio::test]
    async fn test_invalid_tasks_issue_no_calls() {
        let (ledger, gateway) = setup_connected();
        let too_long = "x".repeat(MAX_TASK_LENGTH + 1);

        for task in ["", "    ", "\t\n", too_long.as_str()] {
            let err = gateway.create(task).await.unwrap_err();
            assert!(err.is_validation(), "{task:?} gave {err:?}");
        }
        assert!(ledger.calls().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_ids_issue_no_calls() {
        let (ledger, gateway) = setup_connected();

        for id in [0, -1, i64::MIN] {
            assert!(matches!(
                gateway.toggle(id).await,
                Err(GatewayError::Validation(ValidationError::InvalidTodoId { .. }))
            ));
            assert!(gateway.update(id, "fine").await.unwrap_err().is_validation());
            assert!(gateway.delete(id).await.unwrap_err().is_validation());
        }
        assert!(ledger.calls().is_empty());
    }

    #[tokio::test]
    async fn test_writes_without_signer_are_not_connected() {
        let (ledger, gateway) = setup_read_only();

        assert_eq!(gateway.create("task").await.unwrap_err(), GatewayError::NotConnected);
        assert_eq!(gateway.toggle(1).await.unwrap_err(), GatewayError::NotConnected);
        assert_eq!(gateway.update(1, "task").await.unwrap_err(), GatewayError::NotConnected);
        assert_eq!(gateway.delete(1).await.unwrap_err(), GatewayError::NotConnected);
        assert!(ledger.calls().is_empty());
    }

    #[tokio::test]
    async fn test_signer_without_account_is_not_connected() {
        let ledger = Rc::new(MemoryLedger::new(CONTRACT));
        let gateway = TodoGateway::new(config(), Rc::clone(&ledger) as Rc<dyn LedgerClient>)
            .with_signer(Some(Rc::clone(&ledger) as Rc<dyn TransactionSigner>), None);

        assert!(gateway.create("task").await.unwrap_err().is_not_connected());
        assert!(ledger.calls().is_empty());
    }

    #[tokio::test]
    async fn test_validation_runs_before_connectivity_check() {
        let (_, gateway) = setup_read_only();
        assert!(gateway.create("  ").await.unwrap_err().is_validation());
        assert!(gateway.delete(0).await.unwrap_err().is_validation());
    }

    #[tokio::test]
    async fn test_submission_failure_is_wrapped() {
        let (ledger, gateway) = setup_connected();
        ledger.fail_submit.set(true);

        let err = gateway.create("task").await.unwrap_err();
        match &err {
            GatewayError::OperationFailed { operation, stage, source, .. } => {
                assert_eq!(*operation, Operation::Create);
                assert_eq!(*stage, Stage::Submit);
                assert!(matches!(source, TransportError::Wallet { .. }));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(err.to_string(), "Failed to create todo: wallet error: User rejected the request");
    }

    #[tokio::test]
    async fn test_confirmation_failure_is_surfaced() {
        let (ledger, gateway) = setup_connected();
        let id = ledger.seed(ALICE, "existing") as i64;
        ledger.fail_confirm.set(true);

        let err = gateway.toggle(id).await.unwrap_err();
        assert!(matches!(
            err,
            GatewayError::OperationFailed { operation: Operation::Complete, stage: Stage::Confirm, .. }
        ));
        assert!(err.to_string().starts_with("Failed to complete todo: Transaction failed:"));
    }

    #[tokio::test]
    async fn test_aborted_transaction_is_surfaced() {
        let (_, gateway) = setup_connected();

        let err = gateway.delete(99).await.unwrap_err();
        assert!(matches!(
            err,
            GatewayError::OperationFailed {
                operation: Operation::Delete,
                stage: Stage::Confirm,
                source: TransportError::Rejected { .. },
                ..
            }
        ));
    }

    // ========================
    // Reads
    // ========================

    #[tokio::test]
    async fn test_get_list_rejects_empty_address() {
        let (ledger, gateway) = setup_read_only();
        assert_eq!(
            gateway.get_list("  ").await.unwrap_err(),
            GatewayError::Validation(ValidationError::EmptyAddress)
        );
        assert!(ledger.calls().is_empty());
    }

    #[tokio::test]
    async fn test_read_failures_degrade_to_defaults() {
        let (ledger, gateway) = setup_read_only();
        ledger.seed(ALICE, "hidden by outage");
        ledger.fail_views.set(true);

        assert!(gateway.get_list(ALICE).await.unwrap().is_empty());
        assert_eq!(gateway.get_count(ALICE).await, 0);
        assert!(!gateway.has_list(ALICE).await);
    }

    #[tokio::test]
    async fn test_empty_address_reads_return_defaults_without_calls() {
        let (ledger, gateway) = setup_read_only();
        assert_eq!(gateway.get_count("").await, 0);
        assert!(!gateway.has_list("").await);
        assert!(ledger.calls().is_empty());
    }

    #[tokio::test]
    async fn test_reads_of_account_without_list() {
        let (_, gateway) = setup_read_only();
        assert!(gateway.get_list(ALICE).await.unwrap().is_empty());
        assert_eq!(gateway.get_count(ALICE).await, 0);
        assert!(!gateway.has_list(ALICE).await);
    }

    #[tokio::test]
    async fn test_get_list_drops_batch_with_malformed_element() {
        let (ledger, gateway) = setup_read_only();
        ledger.override_todos(json!([
            {"id": "1", "task": "fine", "completed": false, "created_at": "1700000000"},
            {"id": "2", "completed": true},
        ]));

        assert!(gateway.get_list(ALICE).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_list_drops_batch_with_zero_id() {
        let (ledger, gateway) = setup_read_only();
        ledger.override_todos(json!([
            {"id": "1", "task": "fine"},
            {"id": null, "task": "no id"},
        ]));

        assert!(gateway.get_list(ALICE).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_list_coerces_node_encoding() {
        let (ledger, gateway) = setup_read_only();
        ledger.override_todos(json!([{"id": "9", "task": "from node", "completed": "true"}]));

        let items = gateway.get_list(ALICE).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, 9);
        assert!(items[0].completed);
    }

    #[tokio::test]
    async fn test_reads_use_view_function_paths() {
        let (ledger, gateway) = setup_read_only();
        gateway.get_list(ALICE).await.unwrap();
        gateway.get_count(ALICE).await;
        gateway.has_list(ALICE).await;

        let functions: Vec<String> = ledger
            .calls()
            .into_iter()
            .filter_map(|call| match call {
                RecordedCall::View(request) => Some(request.function.to_string()),
                _ => None,
            })
            .collect();
        assert_eq!(
            functions,
            vec![
                "0xc0ffee::todo_list::get_todos",
                "0xc0ffee::todo_list::get_todo_count",
                "0xc0ffee::todo_list::has_todo_list",
            ]
        );
    }

    // ========================
    // Round trips
    // ========================

    #[tokio::test]
    async fn test_create_adds_one_pending_item() {
        let (ledger, gateway) = setup_connected();
        ledger.seed(ALICE, "first");
        let before = gateway.get_list(ALICE).await.unwrap();

        gateway.create("  second  ").await.unwrap();

        let after = gateway.get_list(ALICE).await.unwrap();
        assert_eq!(after.len(), before.len() + 1);
        let added = after.iter().find(|item| !before.contains(item)).unwrap();
        assert_eq!(added.task, "second");
        assert!(!added.completed);
        assert!(added.id > before.iter().map(|item| item.id).max().unwrap());
        assert_eq!(gateway.get_count(ALICE).await, 2);
        assert!(gateway.has_list(ALICE).await);
    }

    #[tokio::test]
    async fn test_update_scenario() {
        let (ledger, gateway) = setup_connected();
        for n in 1..=5 {
            ledger.seed(ALICE, &format!("task {n}"));
        }
        ledger.clear_calls();

        gateway.update(5, "  Buy milk  ").await.unwrap();

        let submissions = ledger.submissions();
        assert_eq!(
            submissions[0].function_arguments,
            vec![EntryArgument::U64(5), EntryArgument::String("Buy milk".into())]
        );
        let items = gateway.get_list(ALICE).await.unwrap();
        let updated = items.iter().find(|item| item.id == 5).unwrap();
        assert_eq!(updated.task, "Buy milk");
    }

    #[tokio::test]
    async fn test_delete_scenario() {
        let (ledger, gateway) = setup_connected();
        for n in 1..=4 {
            ledger.seed(ALICE, &format!("task {n}"));
        }

        gateway.delete(3).await.unwrap();

        let ids: Vec<u64> = gateway.get_list(ALICE).await.unwrap().iter().map(|item| item.id).collect();
        assert_eq!(ids, vec![1, 2, 4]);
    }

    #[tokio::test]
    async fn test_toggle_flips_completed() {
        let (ledger, gateway) = setup_connected();
        let id = ledger.seed(ALICE, "flip me") as i64;

        gateway.toggle(id).await.unwrap();
        assert!(gateway.get_list(ALICE).await.unwrap()[0].completed);

        gateway.toggle(id).await.unwrap();
        assert!(!gateway.get_list(ALICE).await.unwrap()[0].completed);
    }

    #[tokio::test]
    async fn test_verify_configuration_never_fails() {
        let (ledger, gateway) = setup_connected();
        ledger.fail_views.set(true);
        gateway.verify_configuration(Some(ALICE)).await;
        gateway.verify_configuration(None).await;
    }
}
