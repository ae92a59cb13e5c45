use howsmynhs_core::{BuildReport, EntityWarning, HomepageEntry, NhsError, PageBlocks, TrustPage};

use crate::Engine;
use crate::labels::page_url;

impl Engine {
    /// Entries of the homepage search list: every trust with at least one
    /// block, plus every merger successor.
    #[must_use]
    pub fn homepage_index(&self) -> Vec<HomepageEntry> {
        self.entities()
            .into_iter()
            .filter(|name| {
                self.registry().is_successor(name) || !self.page_blocks(name).is_empty()
            })
            .map(|name| HomepageEntry {
                url: page_url(&name),
                name,
            })
            .collect()
    }

    /// Build the page of one trust.
    ///
    /// The A&E block is left off, rather than failing the page, when there
    /// are too few waiting months to smooth.
    ///
    /// # Errors
    /// Any other error of the summaries behind the page's blocks.
    pub fn page(&self, name: &str) -> Result<TrustPage, NhsError> {
        let mut blocks = self.page_blocks(name);
        let waiting = match blocks
            .contains(PageBlocks::WAITING)
            .then(|| self.waiting_summary(name))
            .transpose()
        {
            Ok(summary) => summary,
            // Enough attendance months but too few waiting months to smooth.
            Err(NhsError::InsufficientData { .. }) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(entity = name, "waiting block dropped; too few months");
                blocks.remove(PageBlocks::WAITING);
                None
            }
            Err(e) => return Err(e),
        };
        let beds = blocks
            .contains(PageBlocks::BEDS)
            .then(|| self.bed_summary(name))
            .transpose()?;
        let deaths = blocks
            .contains(PageBlocks::DEATHS)
            .then(|| self.deaths_summary(name))
            .transpose()?;
        Ok(TrustPage {
            name: name.to_string(),
            url: page_url(name),
            blocks,
            merged: self.registry().is_successor(name),
            waiting,
            beds,
            deaths,
        })
    }

    /// Build every page listed on the homepage.
    ///
    /// Behavior:
    /// - One blocking task per trust, all joined before returning.
    /// - A trust whose page fails is left out and its error lands in
    ///   `warnings`; the other pages are unaffected.
    /// - A task that panics is reported as `NhsError::Task`.
    /// - Pages and warnings keep homepage order.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "howsmynhs::pages::build_pages", skip(self))
    )]
    pub async fn build_pages(&self) -> BuildReport {
        let tasks = self.homepage_index().into_iter().map(|entry| {
            let engine = self.clone();
            let name = entry.name;
            async move {
                let task_name = name.clone();
                let joined = tokio::task::spawn_blocking(move || engine.page(&task_name)).await;
                let res = joined.unwrap_or_else(|e| {
                    Err(NhsError::Task {
                        entity: name.clone(),
                        msg: e.to_string(),
                    })
                });
                (name, res)
            }
        });
        let joined = futures::future::join_all(tasks).await;

        let mut report = BuildReport::default();
        for (entity, res) in joined {
            match res {
                Ok(page) => report.pages.push(page),
                Err(error) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(entity = %entity, error = %error, "page build failed");
                    report.warnings.push(EntityWarning { entity, error });
                }
            }
        }
        report
    }
}
