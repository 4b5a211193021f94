//! Google Forms driver
//!
//! Drives a Google Forms survey page through a WebDriver session using CSS
//! selectors for the form's markup (configurable, with the known Google
//! Forms class names as defaults). Page readiness is an explicit condition:
//! the field count must be non-zero and stable across two consecutive
//! polls, instead of sleeping a fixed duration and hoping.

use super::webdriver::WebDriverClient;
use super::{FieldHandle, FieldKind, FormDriver, FormError, OptionHandle};
use crate::config::{FormpilotConfig, SelectorSet};
use async_trait::async_trait;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info};

const POLL_INTERVAL: Duration = Duration::from_millis(200);

/// [`FormDriver`] implementation for Google Forms markup
pub struct GoogleFormDriver {
    client: WebDriverClient,
    selectors: SelectorSet,
    page_timeout: Duration,
}

impl GoogleFormDriver {
    /// Builds the driver and starts its WebDriver session.
    pub async fn connect(config: &FormpilotConfig) -> Result<Self, FormError> {
        let mut client = WebDriverClient::new(
            &config.webdriver_url,
            Duration::from_secs(config.request_timeout_secs),
        );
        client.new_session().await?;
        info!(endpoint = %config.webdriver_url, "webdriver session started");

        Ok(Self {
            client,
            selectors: config.selectors.clone(),
            page_timeout: Duration::from_secs(config.page_timeout_secs),
        })
    }

    /// Polls until the field count is non-zero and unchanged between two
    /// consecutive polls, or the page timeout elapses.
    async fn wait_for_fields(&self) -> Result<usize, FormError> {
        let deadline = Instant::now() + self.page_timeout;
        let mut previous = 0usize;
        loop {
            let count = self.client.find_elements(&self.selectors.field).await?.len();
            if count > 0 && count == previous {
                debug!(fields = count, "form ready");
                return Ok(count);
            }
            previous = count;
            if Instant::now() >= deadline {
                return Err(FormError::PageTimeout(self.page_timeout));
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }
}

#[async_trait]
impl FormDriver for GoogleFormDriver {
    async fn open(&mut self, url: &str) -> Result<(), FormError> {
        self.client.navigate(url).await?;
        self.wait_for_fields().await?;
        Ok(())
    }

    async fn fields(&mut self) -> Result<Vec<FieldHandle>, FormError> {
        let ids = self.client.find_elements(&self.selectors.field).await?;
        Ok(ids.into_iter().map(|id| FieldHandle { id }).collect())
    }

    async fn title(&mut self, field: &FieldHandle) -> Result<Option<String>, FormError> {
        let ids = self
            .client
            .find_elements_within(&field.id, &self.selectors.title)
            .await?;
        match ids.first() {
            Some(id) => Ok(Some(self.client.text(id).await?)),
            None => Ok(None),
        }
    }

    async fn probe(&mut self, field: &FieldHandle) -> Result<FieldKind, FormError> {
        let single = self
            .client
            .find_elements_within(&field.id, &self.selectors.single_option)
            .await?;
        if !single.is_empty() {
            return Ok(FieldKind::SingleSelect);
        }
        let multi = self
            .client
            .find_elements_within(&field.id, &self.selectors.multi_option)
            .await?;
        if !multi.is_empty() {
            return Ok(FieldKind::MultiSelect);
        }
        Ok(FieldKind::Unknown)
    }

    async fn options(
        &mut self,
        field: &FieldHandle,
        kind: FieldKind,
    ) -> Result<Vec<OptionHandle>, FormError> {
        let selector = match kind {
            FieldKind::SingleSelect => &self.selectors.single_option,
            FieldKind::MultiSelect => &self.selectors.multi_option,
            FieldKind::Unknown => return Ok(Vec::new()),
        };
        let ids = self.client.find_elements_within(&field.id, selector).await?;
        let mut options = Vec::with_capacity(ids.len());
        for id in ids {
            let label = self.client.text(&id).await?;
            options.push(OptionHandle { id, label });
        }
        Ok(options)
    }

    async fn activate(&mut self, option: &OptionHandle) -> Result<(), FormError> {
        self.client.click(&option.id).await?;
        Ok(())
    }

    async fn submit(&mut self) -> Result<(), FormError> {
        let ids = self.client.find_elements(&self.selectors.submit).await?;
        match ids.first() {
            Some(id) => {
                self.client.click(id).await?;
                Ok(())
            }
            None => Err(FormError::MissingSubmit),
        }
    }

    async fn close(&mut self) -> Result<(), FormError> {
        self.client.delete_session().await?;
        Ok(())
    }
}
