use std::collections::HashMap;

use async_trait::async_trait;
use redis::AsyncCommands;
use redis::RedisResult;
use redis::cluster::{ClusterClient, ClusterClientBuilder};
use redis::cluster_async::ClusterConnection;

use crate::domain::entities::{SessionKey, SessionRecord};
use crate::domain::ports::{SessionConnection, StoreConnector};

// A failed command is reported as-is; the client never retries or backs off.
pub const CLUSTER_RETRIES: u32 = 0;

// Redis cluster adapter; every `connect` builds a brand-new client and connection.
#[derive(Clone, Debug)]
pub struct ClusterConnector {
    nodes: Vec<String>,
    retries: u32,
}

impl ClusterConnector {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            nodes: vec![url.into()],
            retries: CLUSTER_RETRIES,
        }
    }

    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    pub fn retries(&self) -> u32 {
        self.retries
    }

    fn client(&self) -> RedisResult<ClusterClient> {
        ClusterClientBuilder::new(self.nodes.clone())
            .retries(self.retries)
            .build()
    }
}

#[async_trait]
impl StoreConnector for ClusterConnector {
    async fn connect(&self) -> Result<Box<dyn SessionConnection>, String> {
        let client = self.client().map_err(|err| err.to_string())?;
        let connection = client
            .get_async_connection()
            .await
            .map_err(|err| err.to_string())?;

        Ok(Box::new(ClusterSession { connection }))
    }
}

// Connection owned by a single invocation; dropped when the probe returns.
struct ClusterSession {
    connection: ClusterConnection,
}

#[async_trait]
impl SessionConnection for ClusterSession {
    async fn write_session(
        &mut self,
        key: &SessionKey,
        record: &SessionRecord,
    ) -> Result<(), String> {
        let fields = record.fields();
        self.connection
            .hset_multiple::<_, _, _, ()>(key.as_str(), &fields)
            .await
            .map_err(|err| err.to_string())
    }

    async fn read_session(&mut self, key: &SessionKey) -> Result<HashMap<String, String>, String> {
        self.connection
            .hgetall(key.as_str())
            .await
            .map_err(|err| err.to_string())
    }
}
