//! Both artifact controllers for one recorded meeting

use crate::config::ProcessingConfig;
use crate::controller::{Activation, ArtifactRequestController};
use crate::domain::models::{ArtifactKind, ArtifactSnapshot};
use crate::ports::{ProcessingServicePort, UrlOpenerPort};
use std::sync::Arc;

/// One controller per artifact kind, all bound to the same recording link.
///
/// Controllers share nothing mutable; a transcript request never blocks a
/// summary request.
pub struct MeetingArtifacts {
    link: String,
    controllers: [ArtifactRequestController; ArtifactKind::COUNT],
}

impl MeetingArtifacts {
    pub fn new(
        link: impl Into<String>,
        service: Arc<dyn ProcessingServicePort>,
        opener: Arc<dyn UrlOpenerPort>,
        config: &ProcessingConfig,
    ) -> Self {
        let link = link.into();
        let controllers = ArtifactKind::ALL.map(|kind| {
            ArtifactRequestController::new(
                kind,
                link.clone(),
                Arc::clone(&service),
                Arc::clone(&opener),
                config,
            )
        });

        Self { link, controllers }
    }

    pub fn link(&self) -> &str {
        &self.link
    }

    pub fn controller(&self, kind: ArtifactKind) -> &ArtifactRequestController {
        &self.controllers[kind.index()]
    }

    pub fn controllers(&self) -> impl Iterator<Item = &ArtifactRequestController> {
        self.controllers.iter()
    }

    pub fn activate(&self, kind: ArtifactKind) -> Activation {
        self.controller(kind).activate()
    }

    pub fn snapshots(&self) -> Vec<ArtifactSnapshot> {
        self.controllers.iter().map(|c| c.snapshot()).collect()
    }
}
