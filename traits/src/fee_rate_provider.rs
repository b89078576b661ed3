use async_trait::async_trait;
use ckb_error::Error;
use ckb_types::core::FeeRate;

/// Reports the current fee rate in shannons per 1000 bytes.
#[async_trait]
pub trait FeeRateProvider: Send + Sync {
    async fn fee_rate(&self) -> Result<FeeRate, Error>;
}
