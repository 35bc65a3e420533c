use super::config::GeometryConfig;
use super::error::VisualizeError;
use super::geometry::{MoleculeGeometry, build_geometry};
use super::scene::SceneDriver;
use crate::core::models::structure::StructureModel;
use crate::core::validation::validate_model;
use std::fmt;
use tracing::{debug, info, warn};

/// Submission number. Later submissions always carry larger tickets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The molecule currently on screen.
#[derive(Debug, Clone)]
pub struct LiveMolecule {
    pub model: StructureModel,
    pub geometry: MoleculeGeometry,
    pub ticket: Ticket,
}

/// Owns the scene and the single live molecule slot.
///
/// Every lookup or debug submission takes a [`Ticket`] before it starts. When
/// it finishes, [`Viewer::commit`] installs the result only if no newer ticket
/// has been committed in the meantime, so a slow early lookup can never
/// overwrite the result of a later one.
pub struct Viewer<S: SceneDriver> {
    scene: S,
    config: GeometryConfig,
    live: Option<LiveMolecule>,
    issued: u64,
    last_committed: Option<Ticket>,
}

impl<S: SceneDriver> Viewer<S> {
    pub fn new(scene: S, config: GeometryConfig) -> Self {
        Self {
            scene,
            config,
            live: None,
            issued: 0,
            last_committed: None,
        }
    }

    /// Issues the ticket for a new submission.
    pub fn begin_submission(&mut self) -> Ticket {
        self.issued += 1;
        Ticket(self.issued)
    }

    pub fn is_stale(&self, ticket: Ticket) -> bool {
        self.last_committed.is_some_and(|last| ticket <= last)
    }

    /// Validates `model`, builds its geometry and swaps it into the scene.
    ///
    /// # Errors
    ///
    /// [`VisualizeError::Superseded`] if a newer ticket was already committed,
    /// or [`VisualizeError::Validation`] if the model breaks a structural
    /// invariant. In both cases the scene and the live slot are unchanged.
    pub fn commit(
        &mut self,
        ticket: Ticket,
        model: StructureModel,
    ) -> Result<&LiveMolecule, VisualizeError> {
        if self.is_stale(ticket) {
            warn!(%ticket, "Discarding stale submission.");
            return Err(VisualizeError::Superseded {
                ticket: ticket.value(),
            });
        }
        validate_model(&model)?;

        let geometry = build_geometry(&model, &self.config);
        self.scene.replace_molecule(&geometry);
        self.last_committed = Some(ticket);

        if let Some(previous) = &self.live {
            debug!(formula = previous.model.formula(), "Disposing previous molecule.");
        }
        info!(
            %ticket,
            formula = model.formula(),
            atoms = model.atoms().len(),
            bonds = model.bonds().len(),
            "Rendered molecule."
        );
        Ok(&*self.live.insert(LiveMolecule {
            model,
            geometry,
            ticket,
        }))
    }

    pub fn live(&self) -> Option<&LiveMolecule> {
        self.live.as_ref()
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut S {
        &mut self.scene
    }

    pub fn config(&self) -> &GeometryConfig {
        &self.config
    }

    pub fn into_scene(self) -> S {
        self.scene
    }
}
