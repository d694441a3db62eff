use crate::core::RateLimiter;
use async_trait::async_trait;
use std::time::Duration;

/// 每次設定呼叫後固定等待一段時間
#[derive(Debug, Clone, Copy)]
pub struct FixedDelay {
    delay: Duration,
}

impl FixedDelay {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for FixedDelay {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

#[async_trait]
impl RateLimiter for FixedDelay {
    async fn wait(&self) {
        tracing::debug!("⏳ Waiting {:?} before next request", self.delay);
        tokio::time::sleep(self.delay).await;
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

#[async_trait]
impl RateLimiter for NoDelay {
    async fn wait(&self) {}
}
