//! Timeout enforcement for downstream calls.
//!
//! Every webhook exchange runs under one deadline covering connect, send
//! and body read. An elapsed deadline surfaces as [`GatewayError::Timeout`],
//! distinct from every other downstream failure.

use std::future::Future;
use std::time::Duration;

use tokio::time::timeout;

use crate::error::{GatewayError, GatewayResult};

/// Run `fut` under `deadline`.
pub async fn with_deadline<T, F>(deadline: Duration, fut: F) -> GatewayResult<T>
where
    F: Future<Output = GatewayResult<T>>,
{
    match timeout(deadline, fut).await {
        Ok(result) => result,
        Err(_) => Err(GatewayError::Timeout(deadline.as_secs())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_completes_within_deadline() {
        let result =
            with_deadline(Duration::from_secs(1), async { Ok::<_, GatewayError>(7) }).await;
        assert_eq!(result.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_inner_error_is_preserved() {
        let result: GatewayResult<()> = with_deadline(Duration::from_secs(1), async {
            Err(GatewayError::Downstream("refused".into()))
        })
        .await;
        assert_eq!(result.unwrap_err().kind(), "downstream");
    }

    #[tokio::test(start_paused = true)]
    async fn test_elapsed_deadline_is_timeout() {
        let result: GatewayResult<()> = with_deadline(Duration::from_secs(60), async {
            tokio::time::sleep(Duration::from_secs(120)).await;
            Ok(())
        })
        .await;
        match result {
            Err(GatewayError::Timeout(secs)) => assert_eq!(secs, 60),
            other => panic!("expected timeout, got {:?}", other),
        }
    }
}
