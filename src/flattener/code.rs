//! # Code
//!
//! The flattener's output: an append-only sequence of steps plus a label
//! table, built via reserve-a-slot-then-patch (`placeholder`/`patch`)
//! rather than the original's captured-closure splicing.

use std::collections::HashMap;

use super::instr::Instr;

#[derive(Debug, Default)]
pub struct Code {
    pub steps: Vec<Instr>,
    pub labels: HashMap<String, usize>,
}

impl Code {
    pub fn new() -> Self {
        Code {
            steps: Vec::new(),
            labels: HashMap::new(),
        }
    }

    /// Appends a fully-known step, returning its index.
    pub fn append(&mut self, instr: Instr) -> usize {
        self.steps.push(instr);
        self.steps.len() - 1
    }

    /// Reserves a slot for a jump whose target depends on structure not
    /// yet flattened (the rest of an `If`/`While`/`For`).
    pub fn placeholder(&mut self) -> usize {
        self.append(Instr::Nop)
    }

    /// Overwrites a previously reserved slot once its target is known.
    pub fn patch(&mut self, index: usize, instr: Instr) {
        self.steps[index] = instr;
    }

    /// The index the next `append` will land at -- the exit target for a
    /// block that has just finished flattening.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
