//! # Flow Module
//!
//! The step state machine of the admission form.
//!
//! ```text
//!                 submit (chooseBCA = no)
//!   PersonalDetails ──────────────────────► Submitted
//!        │  ▲                                   │
//!        │  └───────────── restart ─────────────┘
//!        │ submit (chooseBCA = yes)
//!        ▼
//!   CampusSelection ──── select campus ───► DetailsAndFees
//!          ▲                                    │
//!          └──────────────── back ──────────────┤
//!   PersonalDetails ◄──────── start over ───────┘
//! ```
//!
//! Entry guards ([`resolve_entry`]) are pure and run before any step is
//! shown; a step whose prerequisites are missing resolves to step 1.

mod controller;
mod step;

pub use controller::*;
pub use step::*;
