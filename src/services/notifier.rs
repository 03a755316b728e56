//! Notificaciones a clientes (SMS/WhatsApp)
//!
//! Con `SMS_API_URL` configurado se envía por HTTP al proveedor; en otro caso
//! el mensaje solo se registra en el log.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::{info, warn};

use crate::config::SmsConfig;
use crate::utils::errors::{AppError, AppResult};

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, to: &str, message: &str) -> AppResult<()>;
}

/// Envía y registra el fallo sin propagarlo
pub async fn notify_best_effort(notifier: &dyn Notifier, to: Option<&str>, message: &str) {
    let Some(to) = to.map(str::trim).filter(|t| !t.is_empty()) else {
        warn!("⚠️ Notificación omitida: el cliente no tiene móvil");
        return;
    };
    if let Err(e) = notifier.send(to, message).await {
        warn!("⚠️ No se pudo notificar a {}: {}", to, e);
    }
}

pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, to: &str, message: &str) -> AppResult<()> {
        info!("📨 [notificación] {} <- {}", to, message);
        Ok(())
    }
}

#[derive(Serialize)]
struct SmsRequest<'a> {
    to: &'a str,
    sender: &'a str,
    message: &'a str,
}

pub struct SmsNotifier {
    client: Client,
    api_url: String,
    api_key: Option<String>,
    sender: String,
}

impl SmsNotifier {
    pub fn new(client: Client, api_url: String, api_key: Option<String>, sender: String) -> Self {
        Self {
            client,
            api_url,
            api_key,
            sender,
        }
    }
}

#[async_trait]
impl Notifier for SmsNotifier {
    async fn send(&self, to: &str, message: &str) -> AppResult<()> {
        let mut request = self.client.post(&self.api_url).json(&SmsRequest {
            to,
            sender: &self.sender,
            message,
        });
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::ExternalApi(format!("SMS provider unreachable: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "SMS provider returned {}: {}",
                status, body
            )));
        }

        info!("📱 SMS enviado a {}", to);
        Ok(())
    }
}

pub fn build_notifier(config: &SmsConfig, client: Client) -> Arc<dyn Notifier> {
    match config.api_url.as_deref().filter(|u| !u.is_empty()) {
        Some(url) => {
            info!("📱 Notificaciones por SMS vía {}", url);
            Arc::new(SmsNotifier::new(
                client,
                url.to_string(),
                config.api_key.clone(),
                config.sender.clone(),
            ))
        }
        None => {
            info!("📝 SMS_API_URL no configurado, notificaciones solo en log");
            Arc::new(LogNotifier)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FailingNotifier(AtomicUsize);

    #[async_trait]
    impl Notifier for FailingNotifier {
        async fn send(&self, _to: &str, _message: &str) -> AppResult<()> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Err(AppError::ExternalApi("down".to_string()))
        }
    }

    #[tokio::test]
    async fn failures_are_swallowed() {
        let notifier = FailingNotifier(AtomicUsize::new(0));
        notify_best_effort(&notifier, Some("9876543210"), "hello").await;
        assert_eq!(notifier.0.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn missing_mobile_skips_send() {
        let notifier = FailingNotifier(AtomicUsize::new(0));
        notify_best_effort(&notifier, None, "hello").await;
        notify_best_effort(&notifier, Some("  "), "hello").await;
        assert_eq!(notifier.0.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn log_notifier_always_succeeds() {
        assert!(LogNotifier.send("9876543210", "hello").await.is_ok());
    }
}
