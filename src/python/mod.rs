//! Python bindings for the draft solver.
//!
//! # Quick Start
//!
//! ```python
//! import draft_solver as ds
//!
//! engine = ds.DraftEngine(
//!     format=[("A", "ban"), ("B", "ban"), ("A", "pick"), ("B", "pick")],
//!     role_rewards=[("Taka", 0, 300, 300), ("Rona", 3, 100, 100), ("Saw", 1, 200, 200)],
//! )
//!
//! outcome = engine.run_search(["Saw"])
//! print(outcome.value, outcome.units)
//! print(engine.selectable_units(["Saw"]))
//! ```

use pyo3::prelude::*;

mod py_engine;

pub use py_engine::*;

/// draft_solver: exact minimax recommendations for pick/ban drafts.
#[pymodule]
fn draft_solver(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyDraftEngine>()?;
    m.add_class::<PySearchOutcome>()?;
    Ok(())
}
