//! Generic steady linear transport
//!
//! # Overview
//!
//! [`solve_linear_system`] is the single routine every linear transport
//! algorithm goes through: look the throat conductance up on the phase,
//! assemble, solve, check the solution. [`GenericLinearTransport`] wraps it
//! with the state an algorithm carries between calls (boundary conditions,
//! configured property names, last result).
//!
//! Specialised algorithms such as
//! [`FickianDiffusion`](crate::algorithms::FickianDiffusion) hold a
//! `GenericLinearTransport` and add their own defaults and post-processing.

use crate::error::{Result, TransportError};
use crate::network::Network;
use crate::physics::{Phase, PropertyKey};
use crate::solver::assembly::assemble;
use crate::solver::boundary::{BoundaryCondition, BoundaryConditions};
use crate::solver::result::TransportResult;
use crate::solver::traits::SolverConfiguration;
use crate::solver::validate_values;
use tracing::{debug, info};

/// Bare property name, with a leading `pore.` or `throat.` prefix removed
///
/// `"throat.diffusive_conductance"` and `"diffusive_conductance"` both name
/// the same property. Further dots belong to the name.
pub fn property_name(key: &str) -> &str {
    key.strip_prefix("throat.")
        .or_else(|| key.strip_prefix("pore."))
        .unwrap_or(key)
}

// =================================================================================================
// Shared solve routine
// =================================================================================================

/// Solve steady linear transport on `network`
///
/// # Arguments
///
/// * `conductance` - throat property of `phase` holding the conductances
/// * `quantity` - name under which the solved pore field is reported
///
/// # Errors
///
/// - `MissingBoundaryConditions` without any Dirichlet pore
/// - `MissingProperty` when `throat.<conductance>` is not on the phase
/// - `InvalidConfiguration` for a negative or non-finite conductance
/// - any error of the configured linear solver
pub fn solve_linear_system(
    network: &Network,
    phase: &Phase,
    boundary_conditions: &BoundaryConditions,
    conductance: &str,
    quantity: &str,
    configuration: &SolverConfiguration,
) -> Result<TransportResult> {

    // ====== Step 1: Validation ======

    let solver = configuration.build()?;
    boundary_conditions.validate(network)?;
    if !boundary_conditions.has_dirichlet() {
        return Err(TransportError::MissingBoundaryConditions);
    }

    let conductance = property_name(conductance);
    let quantity = property_name(quantity);

    let key = PropertyKey::throat(conductance).to_string();
    let g = phase.values(&key)?;
    if let Some(throat) = g.iter().position(|g| !g.is_finite() || *g < 0.0) {
        return Err(TransportError::InvalidConfiguration(format!(
            "{} of throat {} is {} (must be finite and non-negative)",
            key, throat, g[throat]
        )));
    }

    // ====== Step 2: Assembly and solve ======

    let system = assemble(network, &g, boundary_conditions)?;
    let report = solver.solve(&system)?;
    validate_values(&report.solution, quantity)?;

    debug!(
        solver = solver.name(),
        iterations = report.iterations,
        residual = report.residual,
        "linear system solved"
    );

    // ====== Step 3: Build result ======

    let mut result = TransportResult::new(
        quantity,
        conductance,
        report.solution,
        g,
        boundary_conditions.clone(),
    )
    .with_convergence(report.iterations, report.residual);

    result.add_metadata("solver", solver.name());
    result.add_metadata("pores", network.num_pores().to_string());
    result.add_metadata("throats", network.num_throats().to_string());

    Ok(result)
}

// =================================================================================================
// Generic linear transport algorithm
// =================================================================================================

/// Steady linear transport algorithm bound to a network and a phase
///
/// # Lifecycle
///
/// 1. [`set_boundary_conditions`](Self::set_boundary_conditions) (repeatable)
/// 2. [`setup`](Self::setup) names the conductance and quantity
/// 3. [`run`](Self::run) computes the field
/// 4. [`rate`](Self::rate), [`calc_eff_prop`](Self::calc_eff_prop),
///    [`result`](Self::result) or [`into_result`](Self::into_result)
///
/// # Example
///
/// ```rust
/// use pnm_rs::fixtures;
/// use pnm_rs::solver::{BoundaryCondition, GenericLinearTransport};
///
/// let (network, phase) = fixtures::prepared().unwrap();
///
/// let mut transport = GenericLinearTransport::new(&network, &phase);
/// transport.set_boundary_conditions(BoundaryCondition::Dirichlet(1.0), &network.pores("left").unwrap()).unwrap();
/// transport.set_boundary_conditions(BoundaryCondition::Dirichlet(0.0), &network.pores("right").unwrap()).unwrap();
/// transport.setup("diffusive_conductance", "mole_fraction");
/// transport.run().unwrap();
///
/// let inflow = transport.rate(&network.pores("left").unwrap()).unwrap();
/// let outflow = transport.rate(&network.pores("right").unwrap()).unwrap();
/// assert!((inflow + outflow).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct GenericLinearTransport<'a> {
    name: String,
    network: &'a Network,
    phase: &'a Phase,
    configuration: SolverConfiguration,
    boundary_conditions: BoundaryConditions,
    conductance: Option<String>,
    quantity: Option<String>,
    result: Option<TransportResult>,
    effective_property: Option<f64>,
}

impl<'a> GenericLinearTransport<'a> {
    /// Create an algorithm named "GenericLinearTransport"
    pub fn new(network: &'a Network, phase: &'a Phase) -> Self {
        Self::named("GenericLinearTransport", network, phase)
    }

    /// Create an algorithm with an explicit name
    pub fn named(name: impl Into<String>, network: &'a Network, phase: &'a Phase) -> Self {
        let name = name.into();
        debug!(algorithm = %name, phase = phase.name(), "linear transport created");
        Self {
            name,
            network,
            phase,
            configuration: SolverConfiguration::default(),
            boundary_conditions: BoundaryConditions::new(),
            conductance: None,
            quantity: None,
            result: None,
            effective_property: None,
        }
    }

    /// Replace the solver configuration
    pub fn with_configuration(mut self, configuration: SolverConfiguration) -> Self {
        self.configuration = configuration;
        self
    }

    /// Algorithm name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Network the algorithm runs on
    pub fn network(&self) -> &'a Network {
        self.network
    }

    /// Phase providing the conductances
    pub fn phase(&self) -> &'a Phase {
        self.phase
    }

    /// Solver configuration
    pub fn configuration(&self) -> &SolverConfiguration {
        &self.configuration
    }

    /// Current boundary conditions
    pub fn boundary_conditions(&self) -> &BoundaryConditions {
        &self.boundary_conditions
    }

    /// Assign a boundary condition to pores (replaces earlier assignments)
    pub fn set_boundary_conditions(&mut self, condition: BoundaryCondition, pores: &[usize]) -> Result<()> {
        self.boundary_conditions.set(self.network, condition, pores)?;
        debug!(
            algorithm = %self.name,
            condition = %condition,
            pores = pores.len(),
            "boundary condition set"
        );
        Ok(())
    }

    /// Remove every boundary condition
    pub fn clear_boundary_conditions(&mut self) {
        self.boundary_conditions.clear();
    }

    /// Name the conductance and quantity used by the next solve
    ///
    /// Element prefixes are accepted and stripped:
    /// `"throat.diffusive_conductance"` is stored as `"diffusive_conductance"`.
    pub fn setup(&mut self, conductance: &str, quantity: &str) {
        self.conductance = Some(property_name(conductance).to_string());
        self.quantity = Some(property_name(quantity).to_string());
    }

    /// Configured conductance name
    pub fn conductance(&self) -> Option<&str> {
        self.conductance.as_deref()
    }

    /// Configured quantity name
    pub fn quantity(&self) -> Option<&str> {
        self.quantity.as_deref()
    }

    /// Solve with the names given to [`setup`](Self::setup)
    ///
    /// # Errors
    ///
    /// `NotConfigured` when `setup` was never called, otherwise the errors of
    /// [`solve_linear_system`]. On error the previous result is kept.
    pub fn run(&mut self) -> Result<()> {
        let (Some(conductance), Some(quantity)) = (&self.conductance, &self.quantity) else {
            return Err(TransportError::NotConfigured(self.name.clone()));
        };

        let result = solve_linear_system(
            self.network,
            self.phase,
            &self.boundary_conditions,
            conductance,
            quantity,
            &self.configuration,
        )?;

        self.store_result(result);
        Ok(())
    }

    /// Keep a freshly solved result, invalidating any derived property
    pub(crate) fn store_result(&mut self, result: TransportResult) {
        info!(
            algorithm = %self.name,
            quantity = result.quantity(),
            iterations = result.iterations(),
            "linear transport solved"
        );
        self.result = Some(result);
        self.effective_property = None;
    }

    /// Result of the last successful solve
    pub fn result(&self) -> Result<&TransportResult> {
        self.result
            .as_ref()
            .ok_or_else(|| TransportError::NotSolved(self.name.clone()))
    }

    /// Consume the algorithm and keep its result
    pub fn into_result(self) -> Result<TransportResult> {
        self.result.ok_or(TransportError::NotSolved(self.name))
    }

    /// Net rate leaving `pores` into the rest of the network
    pub fn rate(&self, pores: &[usize]) -> Result<f64> {
        self.result()?.rate(self.network, pores)
    }

    /// Effective conductance-weighted transport coefficient of the domain
    ///
    /// Uses the boundary conditions of the last solve: pores held at the
    /// highest Dirichlet value form the inlet face, pores at the lowest
    /// value the outlet face.
    ///
    /// ```text
    /// K = |rate(inlets)| · L / (A · ΔBC)
    /// ```
    ///
    /// `L` is the distance between the faces along the flow axis and `A` the
    /// inlet face area normal to it.
    ///
    /// # Errors
    ///
    /// - `NotSolved` before a successful solve
    /// - `InvalidBoundaryConditions` without two distinct Dirichlet values
    pub fn calc_eff_prop(&self) -> Result<f64> {
        let result = self.result()?;
        let faces = result.boundary_conditions().dirichlet_faces()?;

        let axis = self.network.flow_axis(&faces.inlets, &faces.outlets)?;
        let length = self.network.domain_length(&faces.inlets, &faces.outlets)?;
        let area = self.network.domain_area(&faces.inlets, axis)?;
        let flow = result.rate(self.network, &faces.inlets)?;

        let value = flow.abs() * length / (area * (faces.high - faces.low));

        debug!(
            algorithm = %self.name,
            axis,
            length,
            area,
            flow,
            value,
            "effective property computed"
        );

        Ok(value)
    }

    /// Last stored effective property
    pub fn effective_property(&self) -> Option<f64> {
        self.effective_property
    }

    /// Store an effective property derived from the current result
    pub(crate) fn set_effective_property(&mut self, value: f64) {
        self.effective_property = Some(value);
    }
}

// =================================================================================================
// Tests
// =================================================================================================
