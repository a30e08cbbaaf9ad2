//! Dependency negotiation for a (framework, adapter) pair
//!
//! ## Algorithm
//!
//! 1. **Primary** (the test framework): nothing to do when already declared. Otherwise resolve its
//!    candidate versions and have the operator pick one, with no default.
//! 2. **Adapter** (the Arquillian integration): when declared with a version, that version is adopted.
//!    Otherwise, when the container's Arquillian artifact is declared, its version is adopted. Otherwise
//!    resolve candidates and let the operator pick, defaulting to the newest.
//! 3. Only after both choices are made are the planned declarations written, so a failure in step 2
//!    leaves the store untouched.
//!
//! The negotiated version is always the adapter's version; it is what container installers receive.

use arqforge_core::{DependencyCoordinate, TestFramework};

use crate::facets::{DependencyFacet, PromptError, Prompter, ResolutionError};

/// Versions fixed on the command line instead of prompting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionPins {
    pub framework_version: Option<String>,
    pub arquillian_version: Option<String>,
}

/// Result of one negotiation.
#[derive(Debug, Clone, PartialEq)]
pub struct NegotiationOutcome {
    /// The adapter coordinate at the negotiated version.
    pub selected: DependencyCoordinate,
    pub resolved_version: String,
    /// Declarations written during this negotiation, in order.
    pub declared: Vec<DependencyCoordinate>,
}

pub struct DependencyNegotiator<'a, D: DependencyFacet + ?Sized, P: Prompter + ?Sized> {
    store: &'a mut D,
    prompter: &'a mut P,
}

impl<'a, D: DependencyFacet + ?Sized, P: Prompter + ?Sized> DependencyNegotiator<'a, D, P> {
    pub fn new(store: &'a mut D, prompter: &'a mut P) -> Self {
        Self { store, prompter }
    }

    /// Negotiate versions for `framework` and its Arquillian adapter.
    ///
    /// `companion` is the selected container's Arquillian artifact; when declared, it pins the adapter
    /// version.
    ///
    /// ## Errors
    /// - [`ResolutionError::NoCandidateVersions`] when a dependency that needs resolving has no versions.
    /// - [`ResolutionError::Prompt`] when no choice could be obtained or a pinned version is unknown.
    /// - [`ResolutionError::Store`] / [`ResolutionError::Unreachable`] from the store and resolver.
    #[tracing::instrument(skip_all, fields(framework = framework.as_str()))]
    pub fn negotiate(
        &mut self,
        framework: TestFramework,
        companion: Option<&DependencyCoordinate>,
        pins: &VersionPins,
    ) -> Result<NegotiationOutcome, ResolutionError> {
        let primary = framework.primary();
        let adapter = framework.adapter();
        let mut plan = Vec::new();

        if self.store.has_dependency(&primary)? {
            tracing::debug!(dependency = %primary.key(), "framework already declared");
        } else {
            let question = format!("Which version of {} do you want to install?", framework.display_name());
            let version = self.select(&primary, &question, pins.framework_version.as_deref(), false)?;
            plan.push(primary.with_version(version));
        }

        let declared_adapter = self.store.get_dependency(&adapter)?;
        let resolved_version = match declared_adapter.as_ref().and_then(|d| d.version()) {
            Some(version) => {
                tracing::info!(dependency = %adapter.key(), version, "adopting declared adapter version");
                if pins.arquillian_version.as_deref().is_some_and(|pin| pin != version) {
                    tracing::warn!(version, "adapter already declared; ignoring --arquillian-version");
                }
                version.to_string()
            }
            None => {
                let companion_version = match companion {
                    Some(companion) => self
                        .store
                        .get_dependency(companion)?
                        .and_then(|d| d.version().map(str::to_string)),
                    None => None,
                };
                let version = match companion_version {
                    Some(version) => {
                        tracing::info!(version, "adopting version of declared container artifact");
                        version
                    }
                    None => self.select(
                        &adapter,
                        "Which version of Arquillian do you want to install?",
                        pins.arquillian_version.as_deref(),
                        true,
                    )?,
                };
                plan.push(adapter.clone().with_version(version.as_str()));
                version
            }
        };

        for dependency in &plan {
            tracing::info!(dependency = %dependency, "declaring dependency");
            self.store.add_dependency(dependency)?;
        }

        Ok(NegotiationOutcome {
            selected: adapter.with_version(resolved_version.as_str()),
            resolved_version,
            declared: plan,
        })
    }

    /// Resolve candidates for `coordinate` and pick one: the pinned version if given, else the
    /// operator's choice (defaulting to the newest when `default_latest`).
    fn select(
        &mut self,
        coordinate: &DependencyCoordinate,
        question: &str,
        pinned: Option<&str>,
        default_latest: bool,
    ) -> Result<String, ResolutionError> {
        let versions: Vec<String> = self
            .store
            .resolve_available_versions(coordinate)?
            .iter()
            .filter_map(|c| c.version().map(str::to_string))
            .collect();
        if versions.is_empty() {
            return Err(ResolutionError::NoCandidateVersions {
                coordinate: coordinate.key(),
            });
        }

        if let Some(pinned) = pinned {
            if versions.iter().any(|v| v == pinned) {
                return Ok(pinned.to_string());
            }
            return Err(PromptError::NotACandidate {
                version: pinned.to_string(),
                coordinate: coordinate.key(),
                candidates: versions.join(", "),
            }
            .into());
        }

        let default = default_latest.then(|| versions.len() - 1);
        let index = self.prompter.choose(question, &versions, default)?;
        versions
            .get(index)
            .cloned()
            .ok_or_else(|| PromptError::Interaction(format!("choice {} is out of range", index)).into())
    }
}
