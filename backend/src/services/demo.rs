//! Demo data service
//!
//! Owns the per-field rolling sensor history and the background task that
//! appends a fresh sample to every registered field on each tick. The task
//! is owned through a [`SimulationHandle`]; stopping or dropping the handle
//! ends it.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use shared::simulation::{generate_sensor_reading, FieldContext};
use shared::{Season, SensorReading};
use tokio::sync::{oneshot, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::SimulationConfig;

/// Fields tracked when no cap is configured
pub const DEFAULT_MAX_FIELDS: usize = 500;

/// Rolling histories plus registration order for eviction
#[derive(Default)]
struct FieldHistories {
    samples: HashMap<String, VecDeque<SensorReading>>,
    order: VecDeque<String>,
}

pub struct DemoService {
    history: RwLock<FieldHistories>,
    capacity: usize,
    max_fields: usize,
    latency: Duration,
}

/// One sensor sample; the RNG never outlives this call
fn sample_sensor(field_id: &str, now: DateTime<Utc>) -> SensorReading {
    let ctx = FieldContext::new(field_id, Season::from_date(&now));
    generate_sensor_reading(&ctx, now, &mut rand::thread_rng())
}

impl DemoService {
    pub fn new(capacity: usize, latency: Duration) -> Self {
        Self {
            history: RwLock::new(FieldHistories::default()),
            capacity: capacity.max(1),
            max_fields: DEFAULT_MAX_FIELDS,
            latency,
        }
    }

    pub fn with_max_fields(mut self, max_fields: usize) -> Self {
        self.max_fields = max_fields.max(1);
        self
    }

    pub fn from_config(config: &SimulationConfig) -> Self {
        Self::new(
            config.history_capacity,
            Duration::from_millis(config.latency_ms),
        )
        .with_max_fields(config.max_fields)
    }

    /// Delay applied to demo responses so they feel like network calls
    pub async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    /// Start tracking a field, seeding it with one sample. Past the field
    /// cap the earliest registered field is dropped.
    /// Returns false if the field was already tracked.
    pub async fn register_field(&self, field_id: &str) -> bool {
        let mut history = self.history.write().await;
        if history.samples.contains_key(field_id) {
            return false;
        }
        while history.samples.len() >= self.max_fields {
            let Some(oldest) = history.order.pop_front() else {
                break;
            };
            history.samples.remove(&oldest);
            debug!(field_id = %oldest, "Evicted field from sensor simulation");
        }
        let mut samples = VecDeque::with_capacity(self.capacity);
        samples.push_back(sample_sensor(field_id, Utc::now()));
        history.samples.insert(field_id.to_string(), samples);
        history.order.push_back(field_id.to_string());
        info!(field_id = %field_id, "Registered field for sensor simulation");
        true
    }

    /// Append one sample to every registered field, returning how many were updated
    pub async fn tick(&self) -> usize {
        let now = Utc::now();
        let mut history = self.history.write().await;
        for (field_id, samples) in history.samples.iter_mut() {
            if samples.len() >= self.capacity {
                samples.pop_front();
            }
            samples.push_back(sample_sensor(field_id, now));
        }
        history.samples.len()
    }

    /// Rolling history for a field, oldest first. Registers unknown fields.
    pub async fn history(&self, field_id: &str) -> Vec<SensorReading> {
        {
            let history = self.history.read().await;
            if let Some(samples) = history.samples.get(field_id) {
                return samples.iter().cloned().collect();
            }
        }
        self.register_field(field_id).await;
        self.history
            .read()
            .await
            .samples
            .get(field_id)
            .map(|samples| samples.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Most recent sample for a field, registering it if needed
    pub async fn latest(&self, field_id: &str) -> Option<SensorReading> {
        self.history(field_id).await.pop()
    }

    pub async fn field_count(&self) -> usize {
        self.history.read().await.samples.len()
    }

    /// Spawn the simulation loop
    pub fn start_simulation(self: &Arc<Self>, interval: Duration) -> SimulationHandle {
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();
        let service = Arc::clone(self);

        let task = tokio::spawn(async move {
            info!(interval_ms = interval.as_millis() as u64, "Starting sensor simulation");
            let mut ticker = tokio::time::interval(interval);
            let mut tick_count: u64 = 0;

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    _ = ticker.tick() => {
                        tick_count += 1;
                        let fields = service.tick().await;
                        debug!(tick = tick_count, fields, "Simulated sensor tick");
                    }
                }
            }

            info!(ticks = tick_count, "Sensor simulation stopped");
        });

        SimulationHandle {
            shutdown: Some(shutdown_tx),
            task: Some(task),
        }
    }
}

/// Owner of the running simulation task
pub struct SimulationHandle {
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl SimulationHandle {
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Signal the task and wait for it to finish
    pub async fn stop(mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                warn!("Sensor simulation task ended abnormally: {}", e);
            }
        }
    }
}

impl Drop for SimulationHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_history_registers_unknown_field() {
        let demo = DemoService::new(50, Duration::ZERO);
        assert_eq!(demo.field_count().await, 0);

        let history = demo.history("field-a").await;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].field_id, "field-a");
        assert_eq!(demo.field_count().await, 1);
        assert!(!demo.register_field("field-a").await);
    }

    #[tokio::test]
    async fn test_history_is_capped() {
        let demo = DemoService::new(3, Duration::ZERO);
        demo.register_field("field-a").await;
        demo.register_field("field-b").await;
        for _ in 0..5 {
            assert_eq!(demo.tick().await, 2);
        }

        let history = demo.history("field-a").await;
        assert_eq!(history.len(), 3);
        assert!(history.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
        assert_eq!(demo.latest("field-a").await, history.last().cloned());
    }

    #[tokio::test]
    async fn test_field_cap_evicts_earliest() {
        let demo = DemoService::new(50, Duration::ZERO).with_max_fields(3);
        for id in ["f0", "f1", "f2", "f3", "f4"] {
            assert!(demo.register_field(id).await);
        }
        assert_eq!(demo.field_count().await, 3);
        assert_eq!(demo.tick().await, 3);

        // f0 and f1 were dropped, so they register afresh
        assert!(!demo.register_field("f4").await);
        assert!(demo.register_field("f0").await);
        assert_eq!(demo.field_count().await, 3);
        assert!(demo.register_field("f2").await);
    }

    #[tokio::test]
    async fn test_simulation_ticks_until_stopped() {
        let demo = Arc::new(DemoService::new(50, Duration::ZERO));
        demo.register_field("field-a").await;

        let handle = demo.start_simulation(Duration::from_millis(10));
        assert!(handle.is_running());
        tokio::time::sleep(Duration::from_millis(80)).await;
        handle.stop().await;

        let after_stop = demo.history("field-a").await.len();
        assert!(after_stop >= 2);

        tokio::time::sleep(Duration::from_millis(40)).await;
        assert_eq!(demo.history("field-a").await.len(), after_stop);
    }

    #[tokio::test]
    async fn test_dropping_handle_aborts_task() {
        let demo = Arc::new(DemoService::new(50, Duration::ZERO));
        demo.register_field("field-a").await;

        let handle = demo.start_simulation(Duration::from_millis(10));
        drop(handle);
        tokio::time::sleep(Duration::from_millis(20)).await;
        let settled = demo.history("field-a").await.len();

        tokio::time::sleep(Duration::from_millis(40)).await;
        assert_eq!(demo.history("field-a").await.len(), settled);
    }
}
