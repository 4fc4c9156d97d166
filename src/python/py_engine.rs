//! Draft engine bindings for Python.

use std::collections::BTreeSet;
use std::path::PathBuf;

use pyo3::exceptions::{PyIOError, PyValueError};
use pyo3::prelude::*;

use crate::core::{DraftError, SolverConfig, Team};
use crate::draft::Selection;
use crate::rewards::{RawCounterReward, RawRoleReward, RawSynergyReward, RewardEntry};
use crate::search::{DraftEngine, SearchOutcome};

/// `(unit, roles)` as passed from Python.
type PyEntry = (String, Vec<u8>);

fn to_py_err(err: DraftError) -> PyErr {
    match err {
        DraftError::Io(e) => PyIOError::new_err(e.to_string()),
        other => PyValueError::new_err(other.to_string()),
    }
}

fn parse_team(team: &str) -> PyResult<Team> {
    match team {
        "A" | "a" => Ok(Team::A),
        "B" | "b" => Ok(Team::B),
        other => Err(PyValueError::new_err(format!("unknown team '{other}', expected 'A' or 'B'"))),
    }
}

fn parse_selection(selection: &str) -> PyResult<Selection> {
    match selection.to_ascii_lowercase().as_str() {
        "pick" => Ok(Selection::Pick),
        "ban" => Ok(Selection::Ban),
        other => Err(PyValueError::new_err(format!("unknown selection '{other}', expected 'pick' or 'ban'"))),
    }
}

fn entries(raw: Vec<PyEntry>) -> Vec<RewardEntry> {
    raw.into_iter().map(|(unit, roles)| RewardEntry::new(unit, roles)).collect()
}

/// Converted `configure` arguments.
struct Inputs {
    format: Vec<(Team, Selection)>,
    roles: Vec<RawRoleReward>,
    synergies: Vec<RawSynergyReward>,
    counters: Vec<RawCounterReward>,
}

impl Inputs {
    fn convert(
        format: Vec<(String, String)>,
        role_rewards: Vec<(String, u8, i32, i32)>,
        synergies: Vec<(Vec<PyEntry>, i32, i32)>,
        counters: Vec<(Vec<PyEntry>, Vec<PyEntry>, i32, i32)>,
    ) -> PyResult<Self> {
        let format = format
            .iter()
            .map(|(team, selection)| Ok((parse_team(team)?, parse_selection(selection)?)))
            .collect::<PyResult<Vec<_>>>()?;
        Ok(Self {
            format,
            roles: role_rewards
                .into_iter()
                .map(|(unit, role, a, b)| RawRoleReward::new(unit, role, a, b))
                .collect(),
            synergies: synergies
                .into_iter()
                .map(|(list, a, b)| RawSynergyReward::new(entries(list), a, b))
                .collect(),
            counters: counters
                .into_iter()
                .map(|(own, opposing, a, b)| RawCounterReward::new(entries(own), entries(opposing), a, b))
                .collect(),
        })
    }
}

/// Python wrapper for a search result.
#[pyclass(name = "SearchOutcome")]
#[derive(Clone, Debug)]
pub struct PySearchOutcome(pub SearchOutcome);

#[pymethods]
impl PySearchOutcome {
    /// Minimax value from team A's point of view.
    #[getter]
    fn value(&self) -> i32 {
        self.0.value()
    }

    /// Recommended units, one or two.
    #[getter]
    fn units(&self) -> Vec<String> {
        self.0.units().into_iter().map(str::to_owned).collect()
    }

    fn is_double(&self) -> bool {
        matches!(self.0, SearchOutcome::Double { .. })
    }

    fn __repr__(&self) -> String {
        format!("SearchOutcome(value={}, units={:?})", self.0.value(), self.0.units())
    }
}

/// Python wrapper for DraftEngine.
///
/// Rewards are fixed-point integers in 0..=1000 (two-decimal input times 100).
#[pyclass(name = "DraftEngine")]
pub struct PyDraftEngine {
    inner: DraftEngine,
}

#[pymethods]
impl PyDraftEngine {
    /// Configure a new engine.
    ///
    /// # Arguments
    /// - format: list of (team, selection), team "A"/"B", selection "pick"/"ban"
    /// - role_rewards: list of (unit, role, value_a, value_b)
    /// - synergies: list of ([(unit, [roles])], value_a, value_b)
    /// - counters: list of ([(unit, [roles])], [(unit, [roles])], value_a, value_b)
    /// - seed: Zobrist key seed
    /// - first_mover: side committing first when flexible picks are ambiguous
    #[new]
    #[pyo3(signature = (
        format,
        role_rewards,
        synergies = Vec::new(),
        counters = Vec::new(),
        seed = 42,
        first_mover = "A"
    ))]
    fn new(
        format: Vec<(String, String)>,
        role_rewards: Vec<(String, u8, i32, i32)>,
        synergies: Vec<(Vec<PyEntry>, i32, i32)>,
        counters: Vec<(Vec<PyEntry>, Vec<PyEntry>, i32, i32)>,
        seed: u64,
        first_mover: &str,
    ) -> PyResult<Self> {
        let config = SolverConfig::default()
            .with_seed(seed)
            .with_first_mover(parse_team(first_mover)?);
        let inputs = Inputs::convert(format, role_rewards, synergies, counters)?;
        let inner = DraftEngine::configure(config, &inputs.format, &inputs.roles, &inputs.synergies, &inputs.counters)
            .map_err(to_py_err)?;
        Ok(Self { inner })
    }

    /// Replace the format and rewards; clears the transposition table.
    #[pyo3(signature = (format, role_rewards, synergies = Vec::new(), counters = Vec::new()))]
    fn configure(
        &mut self,
        format: Vec<(String, String)>,
        role_rewards: Vec<(String, u8, i32, i32)>,
        synergies: Vec<(Vec<PyEntry>, i32, i32)>,
        counters: Vec<(Vec<PyEntry>, Vec<PyEntry>, i32, i32)>,
    ) -> PyResult<()> {
        let inputs = Inputs::convert(format, role_rewards, synergies, counters)?;
        self.inner
            .reconfigure(&inputs.format, &inputs.roles, &inputs.synergies, &inputs.counters)
            .map_err(to_py_err)
    }

    /// Best selection(s) after the given history of unit names.
    fn run_search(&mut self, history: Vec<String>) -> PyResult<PySearchOutcome> {
        self.inner.run_search(history.as_slice()).map(PySearchOutcome).map_err(to_py_err)
    }

    /// Units selectable at `stage` (default: the stage after `history`).
    #[pyo3(signature = (history, stage = None))]
    fn selectable_units(&self, history: Vec<String>, stage: Option<usize>) -> PyResult<BTreeSet<String>> {
        self.inner.selectable_units(history.as_slice(), stage).map_err(to_py_err)
    }

    /// Resolve each picked unit's role.
    ///
    /// Returns (value, [(unit, role)] for A, [(unit, role)] for B).
    #[allow(clippy::type_complexity)]
    fn resolve_roles(&self, history: Vec<String>) -> PyResult<(i32, Vec<(String, u8)>, Vec<(String, u8)>)> {
        let resolution = self.inner.resolve_roles(history.as_slice()).map_err(to_py_err)?;
        let side = |team: Team| -> Vec<(String, u8)> {
            resolution.assignments[team]
                .iter()
                .map(|(name, role)| (name.clone(), role.index() as u8))
                .collect()
        };
        Ok((resolution.value, side(Team::A), side(Team::B)))
    }

    fn save_transposition_table(&self, path: PathBuf) -> PyResult<()> {
        self.inner.save_transposition_table(path).map_err(to_py_err)
    }

    fn load_transposition_table(&mut self, path: PathBuf) -> PyResult<()> {
        self.inner.load_transposition_table(path).map_err(to_py_err)
    }

    /// Number of entries in the transposition table.
    fn table_size(&self) -> usize {
        self.inner.table().len()
    }

    fn __repr__(&self) -> String {
        format!(
            "DraftEngine(ids={}, stages={}, table={})",
            self.inner.identities().len(),
            self.inner.format().len(),
            self.inner.table().len()
        )
    }
}
