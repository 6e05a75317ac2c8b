//! Concrete state handler functions and table builder.
//!
//! ```text
//!  NORMAL ──[Menu]──▶ MAIN MENU ──[Select 1]──▶ TEMP ADJUST ─┐
//!    ▲                 │   ▲  │                               │
//!    └───[Select 3]────┘   │  └──[Select 2]──▶ TIME ADJUST ──┤
//!                          └────────────[Select: commit]─────┘
//!
//!  MAIN MENU ──[Select 4]──▶ shutdown
//! ```
//!
//! Button roles: Normal mode `Two`=Hold `Three`=Restart `Four`=Menu; every
//! menu page `Two`=Up `Three`=Down `Four`=Select.

use std::time::Duration;

use log::info;

use super::context::{MenuAction, MenuContext};
use super::{StateDescriptor, StateId};
use crate::events::Button;

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the static state table.  Called once at startup.
pub fn build_state_table() -> [StateDescriptor; StateId::COUNT] {
    [
        // Index 0 Normal
        StateDescriptor {
            id: StateId::Normal,
            name: "Normal",
            on_enter: Some(normal_enter),
            on_button: normal_button,
        },
        // Index 1 MainMenu
        StateDescriptor {
            id: StateId::MainMenu,
            name: "MainMenu",
            on_enter: Some(redraw),
            on_button: main_menu_button,
        },
        // Index 2 TempAdjust
        StateDescriptor {
            id: StateId::TempAdjust,
            name: "TempAdjust",
            on_enter: Some(temp_adjust_enter),
            on_button: temp_adjust_button,
        },
        // Index 3 TimeAdjust
        StateDescriptor {
            id: StateId::TimeAdjust,
            name: "TimeAdjust",
            on_enter: Some(time_adjust_enter),
            on_button: time_adjust_button,
        },
    ]
}

fn redraw(ctx: &mut MenuContext) {
    ctx.push(MenuAction::RedrawMenu);
}

// ═══════════════════════════════════════════════════════════════════════════
//  NORMAL state
// ═══════════════════════════════════════════════════════════════════════════

fn normal_enter(ctx: &mut MenuContext) {
    ctx.push(MenuAction::ResumeNormalView);
}

fn normal_button(ctx: &mut MenuContext, button: Button) -> Option<StateId> {
    match button {
        Button::Two => ctx.push(MenuAction::CaptureHold),
        Button::Three => ctx.push(MenuAction::Restart),
        Button::Four => {
            ctx.highlighted = 1;
            return Some(StateId::MainMenu);
        }
    }
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  MAIN MENU
// ═══════════════════════════════════════════════════════════════════════════

fn main_menu_button(ctx: &mut MenuContext, button: Button) -> Option<StateId> {
    match button {
        Button::Two => ctx.move_highlight(false),
        Button::Three => ctx.move_highlight(true),
        Button::Four => {
            return match ctx.highlighted {
                1 => Some(StateId::TempAdjust),
                2 => Some(StateId::TimeAdjust),
                3 => Some(StateId::Normal),
                _ => {
                    info!("MAIN MENU: exit selected");
                    ctx.push(MenuAction::Shutdown);
                    None
                }
            };
        }
    }
    ctx.push(MenuAction::RedrawMenu);
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  TEMP ADJUST: staged calibration offset
// ═══════════════════════════════════════════════════════════════════════════

fn temp_adjust_enter(ctx: &mut MenuContext) {
    ctx.staged_offset_c = ctx.config.calibration_offset_c;
    ctx.push(MenuAction::RedrawMenu);
}

fn temp_adjust_button(ctx: &mut MenuContext, button: Button) -> Option<StateId> {
    match button {
        Button::Two => ctx.raise_offset(),
        Button::Three => ctx.lower_offset(),
        Button::Four => {
            ctx.config.calibration_offset_c = ctx.staged_offset_c;
            info!("TEMP ADJUST: offset committed at {:.1} C", ctx.staged_offset_c);
            return Some(StateId::MainMenu);
        }
    }
    ctx.push(MenuAction::RedrawMenu);
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  TIME ADJUST: staged sampling interval
// ═══════════════════════════════════════════════════════════════════════════

fn time_adjust_enter(ctx: &mut MenuContext) {
    ctx.staged_interval = ctx.config.interval_index;
    ctx.push(MenuAction::RedrawMenu);
}

fn time_adjust_button(ctx: &mut MenuContext, button: Button) -> Option<StateId> {
    match button {
        Button::Two => ctx.next_interval(),
        Button::Three => ctx.prev_interval(),
        Button::Four => {
            ctx.config.interval_index = ctx.staged_interval;
            let secs = ctx.config.interval_secs();
            info!("TIME ADJUST: interval committed at {}s", secs);
            ctx.push(MenuAction::RearmSampling(Duration::from_secs(secs as u64)));
            return Some(StateId::MainMenu);
        }
    }
    ctx.push(MenuAction::RedrawMenu);
    None
}
