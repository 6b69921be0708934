use envbind::{ensure, impl_record, EnvErrors};

#[derive(Debug, Clone)]
pub struct RabbitMQConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub queue_name: String,
    pub topics: Vec<String>,
}

impl Default for RabbitMQConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5672,
            username: "guest".to_string(),
            password: "guest".to_string(),
            queue_name: "sensor_data".to_string(),
            topics: vec!["sensors.#".to_string()],
        }
    }
}

impl RabbitMQConfig {
    /// Connection string with the password masked, safe to print.
    pub fn redacted_url(&self) -> String {
        format!(
            "amqp://{}:{}@{}:{}",
            self.username,
            envbind::REDACTED,
            self.host,
            self.port
        )
    }
}

impl_record!(RabbitMQConfig {
    host,
    port,
    username,
    password,
    queue_name,
    topics,
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebSocketConfig {
    pub host: String,
    pub port: u16,
    pub max_connections: u32,
}

impl Default for WebSocketConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 8080,
            max_connections: 1024,
        }
    }
}

impl_record!(WebSocketConfig {
    host,
    port,
    max_connections,
});

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub rabbitmq: RabbitMQConfig,
    pub websocket: Option<WebSocketConfig>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            rabbitmq: RabbitMQConfig::default(),
            websocket: Some(WebSocketConfig::default()),
        }
    }
}

impl_record!(ServiceConfig {
    rabbitmq,
    websocket,
});

impl ServiceConfig {
    pub const PREFIX: &'static str = "ANALYTICS";

    /// Post-load checks, merged into the load result.
    pub fn validate(&self, result: Result<(), EnvErrors>) -> Result<(), EnvErrors> {
        let result = ensure!(
            result,
            "ANALYTICS_RABBITMQ_PORT",
            self.rabbitmq.port > 0,
            "must be a positive port"
        );
        let result = ensure!(
            result,
            "ANALYTICS_RABBITMQ_QUEUE_NAME",
            !self.rabbitmq.queue_name.is_empty(),
            "must not be empty"
        );
        match &self.websocket {
            Some(ws) => ensure!(
                result,
                "ANALYTICS_WEBSOCKET_MAX_CONNECTIONS",
                (1..=65_536).contains(&ws.max_connections),
                "must be between {} and {}",
                1,
                65_536
            ),
            None => result,
        }
    }
}
