//! Tests for the connection registry

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use sqlfleet_core::{
    Connection, DiagnosticSource, Endpoint, FleetError, QueryResult, Result, StatementResult,
    Value,
};

use super::factory::ConnectionFactory;
use super::registry::ConnectionRegistry;
use crate::{FleetConfig, InstanceConfig, InstanceStatus};

/// Mock connection for testing
struct MockConnection {
    endpoint: Endpoint,
    closed: AtomicBool,
    healthy: bool,
}

#[async_trait]
impl Connection for MockConnection {
    fn driver_name(&self) -> &str {
        "mock"
    }

    async fn execute(&self, _sql: &str, _params: &[Value]) -> Result<StatementResult> {
        Ok(StatementResult { affected_rows: 1 })
    }

    async fn query(&self, sql: &str, _params: &[Value]) -> Result<QueryResult> {
        if !self.healthy {
            return Err(FleetError::Connection(format!("{} is down", self.endpoint)));
        }
        Ok(QueryResult::from_rows(
            ["endpoint", "sql"],
            vec![vec![
                Value::from(self.endpoint.to_string()),
                Value::from(sql),
            ]],
        ))
    }

    async fn close(&self) -> Result<()> {
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

/// Mock factory that counts connections created and remembers them
struct MockConnectionFactory {
    counter: AtomicUsize,
    down: HashSet<Endpoint>,
    refused: HashSet<Endpoint>,
    created: Mutex<Vec<Arc<MockConnection>>>,
}

impl MockConnectionFactory {
    fn new() -> Self {
        Self {
            counter: AtomicUsize::new(0),
            down: HashSet::new(),
            refused: HashSet::new(),
            created: Mutex::new(Vec::new()),
        }
    }

    fn with_down(mut self, endpoint: Endpoint) -> Self {
        self.down.insert(endpoint);
        self
    }

    fn with_refused(mut self, endpoint: Endpoint) -> Self {
        self.refused.insert(endpoint);
        self
    }

    fn count(&self) -> usize {
        self.counter.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ConnectionFactory for MockConnectionFactory {
    async fn create(
        &self,
        endpoint: &Endpoint,
        _config: &InstanceConfig,
    ) -> Result<Arc<dyn Connection>> {
        if self.refused.contains(endpoint) {
            return Err(FleetError::Connection(format!("{endpoint} refused")));
        }
        self.counter.fetch_add(1, Ordering::SeqCst);
        let conn = Arc::new(MockConnection {
            endpoint: endpoint.clone(),
            closed: AtomicBool::new(false),
            healthy: !self.down.contains(endpoint),
        });
        self.created.lock().push(conn.clone());
        Ok(conn as Arc<dyn Connection>)
    }
}

fn endpoint(port: u16) -> Endpoint {
    Endpoint::new("127.0.0.1", port)
}

fn dba_config() -> InstanceConfig {
    InstanceConfig::new("dba", "dba", "repl", "repl")
}

mod register_tests {
    use super::*;

    #[tokio::test]
    async fn test_register_and_unregister() {
        let registry = ConnectionRegistry::new(MockConnectionFactory::new());

        registry.register(endpoint(3301), dba_config()).await.unwrap();
        registry.register(endpoint(3302), dba_config()).await.unwrap();
        registry.register(endpoint(3303), dba_config()).await.unwrap();
        assert_eq!(registry.len(), 3);

        registry.unregister(&endpoint(3301)).await;
        assert_eq!(registry.len(), 2);
        assert!(registry.get(&endpoint(3301)).is_none());

        registry.register(endpoint(3301), dba_config()).await.unwrap();
        assert_eq!(registry.len(), 3);
        assert_eq!(
            registry.endpoints(),
            vec![endpoint(3301), endpoint(3302), endpoint(3303)]
        );
    }

    #[tokio::test]
    async fn test_register_twice_keeps_first() {
        let factory = Arc::new(MockConnectionFactory::new());
        let registry = ConnectionRegistry::new(factory.clone());

        registry.register(endpoint(3301), dba_config()).await.unwrap();
        let other = InstanceConfig::new("root", "root", "repl", "repl");
        registry.register(endpoint(3301), other).await.unwrap();

        assert_eq!(factory.count(), 1);
        assert_eq!(registry.instance_config(&endpoint(3301)), Some(dba_config()));
    }

    #[tokio::test]
    async fn test_register_propagates_factory_error() {
        let factory = MockConnectionFactory::new().with_refused(endpoint(3301));
        let registry = ConnectionRegistry::new(factory);

        let err = registry
            .register(endpoint(3301), dba_config())
            .await
            .unwrap_err();
        assert!(matches!(err, FleetError::Connection(_)));
        assert!(!registry.is_registered(&endpoint(3301)));
        assert!(registry.is_empty());
    }

    #[tokio::test]
    async fn test_unregister_closes_connection() {
        let factory = Arc::new(MockConnectionFactory::new());
        let registry = ConnectionRegistry::new(factory.clone());

        registry.register(endpoint(3301), dba_config()).await.unwrap();
        let conn = factory.created.lock()[0].clone();
        assert!(!conn.is_closed());

        registry.unregister(&endpoint(3301)).await;
        assert!(conn.is_closed());
    }

    #[tokio::test]
    async fn test_unregister_unknown_is_noop() {
        let registry = ConnectionRegistry::new(MockConnectionFactory::new());
        registry.unregister(&endpoint(9999)).await;
        assert!(registry.is_empty());
    }

    #[tokio::test]
    async fn test_register_fleet() {
        let fleet = FleetConfig::from_toml_str(
            r#"
            [defaults]
            dba_user = "dba"

            [[endpoints]]
            address = "127.0.0.1:3301"

            [[endpoints]]
            address = "127.0.0.1:3302"
            "#,
        )
        .unwrap();

        let registry = ConnectionRegistry::new(MockConnectionFactory::new());
        registry.register_fleet(&fleet).await.unwrap();
        assert_eq!(registry.endpoints(), vec![endpoint(3301), endpoint(3302)]);
        assert_eq!(
            registry.instance_config(&endpoint(3302)).map(|c| c.dba_user),
            Some("dba".to_string())
        );
    }
}

mod status_tests {
    use super::*;

    #[tokio::test]
    async fn test_check_instance() {
        let factory = MockConnectionFactory::new().with_down(endpoint(3302));
        let registry = ConnectionRegistry::new(factory);
        registry.register(endpoint(3301), dba_config()).await.unwrap();
        registry.register(endpoint(3302), dba_config()).await.unwrap();

        assert_eq!(registry.check_instance(&endpoint(3301)).await, InstanceStatus::Ok);
        assert_eq!(
            registry.check_instance(&endpoint(3302)).await,
            InstanceStatus::Error
        );
        assert_eq!(
            registry.check_instance(&endpoint(3303)).await,
            InstanceStatus::Unregistered
        );
    }

    #[tokio::test]
    async fn test_is_reachable() {
        let factory = MockConnectionFactory::new().with_down(endpoint(3302));
        let registry = ConnectionRegistry::new(factory);
        registry.register(endpoint(3301), dba_config()).await.unwrap();
        registry.register(endpoint(3302), dba_config()).await.unwrap();

        assert!(registry.is_reachable(&endpoint(3301)).await);
        assert!(!registry.is_reachable(&endpoint(3302)).await);
        assert!(!registry.is_reachable(&endpoint(3303)).await);
    }
}

mod source_tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_rows_routes_to_endpoint() {
        let registry = ConnectionRegistry::new(MockConnectionFactory::new());
        registry.register(endpoint(3301), dba_config()).await.unwrap();
        registry.register(endpoint(3302), dba_config()).await.unwrap();

        let result = registry
            .fetch_rows(&endpoint(3302), "SHOW MASTER STATUS", &[])
            .await
            .unwrap();
        let row = &result.rows[0];
        assert_eq!(row.get_by_name("endpoint"), Some(&Value::from("127.0.0.1:3302")));
        assert_eq!(row.get_by_name("sql"), Some(&Value::from("SHOW MASTER STATUS")));
    }

    #[tokio::test]
    async fn test_fetch_rows_unregistered() {
        let registry = ConnectionRegistry::new(MockConnectionFactory::new());
        let err = registry
            .fetch_rows(&endpoint(3301), "SHOW MASTER STATUS", &[])
            .await
            .unwrap_err();
        assert!(matches!(err, FleetError::NotRegistered(e) if e == endpoint(3301)));
    }

    #[tokio::test]
    async fn test_execute_unregistered() {
        let registry = ConnectionRegistry::new(MockConnectionFactory::new());
        let err = registry
            .execute(&endpoint(3301), "START SLAVE", &[])
            .await
            .unwrap_err();
        assert!(matches!(err, FleetError::NotRegistered(_)));
    }

    #[tokio::test]
    async fn test_execute_routes_to_connection() {
        let registry = ConnectionRegistry::new(MockConnectionFactory::new());
        registry.register(endpoint(3301), dba_config()).await.unwrap();
        let result = registry
            .execute(&endpoint(3301), "STOP SLAVE", &[])
            .await
            .unwrap();
        assert_eq!(result.affected_rows, 1);
    }
}
