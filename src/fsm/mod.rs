//! Function-pointer finite state machine for the operator menu.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  StateTable                                                  │
//! │  ┌────────────┬───────────┬─────────────────────┐            │
//! │  │ StateId    │ on_enter  │ on_button           │            │
//! │  ├────────────┼───────────┼─────────────────────┤            │
//! │  │ Normal     │ fn(ctx)   │ fn(ctx,btn)->Option │            │
//! │  │ MainMenu   │ fn(ctx)   │ fn(ctx,btn)->Option │            │
//! │  │ TempAdjust │ fn(ctx)   │ fn(ctx,btn)->Option │            │
//! │  │ TimeAdjust │ fn(ctx)   │ fn(ctx,btn)->Option │            │
//! │  └────────────┴───────────┴─────────────────────┘            │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each button press calls `on_button` for the **current** state.  If it
//! returns `Some(next_id)`, the engine moves the current pointer and runs
//! `on_enter` for the next state.  Handlers
//! never touch a port: they edit [`MenuContext`] and queue
//! [`MenuAction`](context::MenuAction)s for the service to apply.

pub mod context;
pub mod states;

use context::MenuContext;
use log::info;

use crate::events::Button;

// ---------------------------------------------------------------------------
// State identity
// ---------------------------------------------------------------------------

/// Every menu state.
/// Must stay in sync with the table built in [`states::build_state_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum StateId {
    Normal = 0,
    MainMenu = 1,
    TempAdjust = 2,
    TimeAdjust = 3,
}

impl StateId {
    pub const COUNT: usize = 4;

    /// Convert an index back to `StateId`.  Panics on out-of-range in debug
    /// builds; returns `Normal` in release.
    pub fn from_index(idx: usize) -> Self {
        match idx {
            0 => Self::Normal,
            1 => Self::MainMenu,
            2 => Self::TempAdjust,
            3 => Self::TimeAdjust,
            _ => {
                debug_assert!(false, "invalid state index: {idx}");
                Self::Normal
            }
        }
    }

    pub fn mode(self) -> Mode {
        match self {
            Self::Normal => Mode::Normal,
            Self::MainMenu | Self::TempAdjust | Self::TimeAdjust => Mode::Menu,
        }
    }
}

/// Which way the side buttons and keyboard are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Menu,
}

// ---------------------------------------------------------------------------
// Function-pointer type aliases
// ---------------------------------------------------------------------------

/// Signature for `on_enter` actions.
pub type StateActionFn = fn(&mut MenuContext);

/// Signature for the per-press handler.
/// Returns `Some(next)` to trigger a transition, or `None` to stay.
pub type ButtonHandlerFn = fn(&mut MenuContext, Button) -> Option<StateId>;

// ---------------------------------------------------------------------------
// State descriptor (one row in the table)
// ---------------------------------------------------------------------------

pub struct StateDescriptor {
    /// Must equal the row's index in the table.
    pub id: StateId,
    pub name: &'static str,
    pub on_enter: Option<StateActionFn>,
    pub on_button: ButtonHandlerFn,
}

// ---------------------------------------------------------------------------
// FSM engine
// ---------------------------------------------------------------------------

pub struct MenuFsm {
    /// Fixed-size table indexed by `StateId as usize`.
    table: [StateDescriptor; StateId::COUNT],
    current: usize,
}

impl MenuFsm {
    pub fn new(table: [StateDescriptor; StateId::COUNT], initial: StateId) -> Self {
        for (idx, row) in table.iter().enumerate() {
            assert_eq!(row.id as usize, idx, "state table row {} out of order", row.name);
        }
        Self {
            table,
            current: initial as usize,
        }
    }

    /// Run the initial `on_enter`.  Call once before the first press.
    pub fn start(&mut self, ctx: &mut MenuContext) {
        info!("menu starting in state: {}", self.table[self.current].name);
        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }

    /// Dispatch one button press to the current state.
    pub fn press(&mut self, button: Button, ctx: &mut MenuContext) {
        let next = (self.table[self.current].on_button)(ctx, button);
        if let Some(next_id) = next {
            self.transition(next_id, ctx);
        }
    }

    pub fn current_state(&self) -> StateId {
        StateId::from_index(self.current)
    }

    pub fn mode(&self) -> Mode {
        self.current_state().mode()
    }

    fn transition(&mut self, next_id: StateId, ctx: &mut MenuContext) {
        let next_idx = next_id as usize;

        info!(
            "menu transition: {} -> {}",
            self.table[self.current].name, self.table[next_idx].name
        );

        self.current = next_idx;

        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }
}
