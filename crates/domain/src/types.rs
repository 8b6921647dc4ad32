// Copyright (C) 2026 The Tinturaria Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::Date;

/// A factory section identifier (dyeing, finishing, ...).
///
/// Sections scope lot line numbering and ticket numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Section(u16);

impl Section {
    /// Creates a new section identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is zero.
    pub fn new(value: u16) -> Result<Self, DomainError> {
        if value == 0 {
            return Err(DomainError::InvalidSection(String::from(
                "section must be greater than 0",
            )));
        }
        Ok(Self(value))
    }

    /// Returns the numeric section value.
    #[must_use]
    pub const fn value(self) -> u16 {
        self.0
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The identity of a lot reception line: section, reception date, line number.
///
/// Line numbers restart at 1 per (section, date).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LotLineKey {
    /// The section the lot was received in.
    pub section: Section,
    /// The reception date.
    pub received_on: Date,
    /// The line number within (section, date).
    pub line_no: i32,
}

impl std::fmt::Display for LotLineKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.section, self.received_on, self.line_no)
    }
}

/// A roll count together with a weight in kilograms.
///
/// Rolls are whole units; weights carry the fractional kilograms the scales
/// report.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Quantity {
    /// Number of rolls.
    pub rolls: i32,
    /// Weight in kilograms.
    pub weight: f64,
}

impl Quantity {
    /// Creates a quantity without range validation.
    #[must_use]
    pub const fn new(rolls: i32, weight: f64) -> Self {
        Self { rolls, weight }
    }

    /// Returns true when both axes are zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.rolls == 0 && self.weight == 0.0
    }

    /// Returns true when either axis exceeds the corresponding axis of `limit`.
    #[must_use]
    pub fn exceeds(&self, limit: &Self) -> bool {
        self.rolls > limit.rolls || self.weight > limit.weight
    }

    /// Component-wise sum.
    #[must_use]
    pub fn plus(&self, other: &Self) -> Self {
        Self {
            rolls: self.rolls + other.rolls,
            weight: self.weight + other.weight,
        }
    }

    /// Component-wise difference.
    #[must_use]
    pub fn minus(&self, other: &Self) -> Self {
        Self {
            rolls: self.rolls - other.rolls,
            weight: self.weight - other.weight,
        }
    }
}

/// A lot reception line with its requested and delivered balances.
///
/// `delivered` is mutated only by allocation into a finishing ticket; the
/// invariant `0 <= delivered <= requested` holds on both axes at all times.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LotLine {
    /// The line identity.
    pub key: LotLineKey,
    /// The owning client.
    pub client_id: i32,
    /// Denormalized client name, as recorded at reception.
    pub client_name: String,
    /// The article code.
    pub article_code: i32,
    /// The article description.
    pub article_description: String,
    /// The fabric composition code.
    pub composition_code: i32,
    /// The fabric composition description.
    pub composition_description: String,
    /// The quantity received.
    pub requested: Quantity,
    /// The quantity already allocated into tickets.
    pub delivered: Quantity,
    /// Free-text client requisition reference.
    pub requisition: String,
}

impl LotLine {
    /// The balance still available for allocation.
    #[must_use]
    pub fn pending(&self) -> Quantity {
        self.requested.minus(&self.delivered)
    }

    /// Returns true once the full requested quantity has been allocated.
    #[must_use]
    pub fn is_fully_allocated(&self) -> bool {
        self.pending().is_zero()
    }
}

/// The lifecycle state of a finishing ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TicketState {
    /// Deliveries may still be registered.
    #[default]
    Open,
    /// Cumulative delivered equals totals; no further deliveries.
    Completed,
}

impl TicketState {
    /// Converts this state to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Completed => "completed",
        }
    }
}

impl FromStr for TicketState {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(Self::Open),
            "completed" => Ok(Self::Completed),
            _ => Err(DomainError::InvalidTicketState(s.to_string())),
        }
    }
}

impl std::fmt::Display for TicketState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A finishing ticket ("Ficha de Acabamento") header.
///
/// Totals are the sum of the allocation amounts and never change after
/// creation; new work requires a new ticket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    /// The section the ticket belongs to.
    pub section: Section,
    /// The sequential ticket number, scoped per section.
    pub ticket_no: u32,
    /// The creation date.
    pub created_on: Date,
    /// Sum of allocation amounts.
    pub totals: Quantity,
    /// The lifecycle state.
    pub state: TicketState,
    /// Free-text note.
    pub note: String,
}

/// The link between a lot line and a ticket, carrying the quantity moved from
/// the line's pending balance into the ticket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    /// The source lot line.
    pub lot_line: LotLineKey,
    /// The allocated quantity.
    pub amount: Quantity,
}

/// One finishing operation (bleach, desize, dye, ...) recorded against a
/// ticket. Ordered and append-only; removable individually.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessStep {
    /// The line number within the ticket.
    pub line_no: i32,
    /// The date the step was recorded.
    pub recorded_on: Date,
    /// The process definition identifier.
    pub process_def_id: i32,
    /// Optional color identifier for dyeing steps.
    pub color_id: Option<i32>,
    /// The quantity the step was applied to.
    pub amount: Quantity,
    /// Free-text note.
    pub note: String,
}

/// A partial handover of finished goods against a ticket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryEvent {
    /// The event line number within the ticket.
    pub line_no: i32,
    /// The delivery date.
    pub delivered_on: Date,
    /// The delivered quantity.
    pub amount: Quantity,
    /// The resulting goods state.
    pub state_id: i32,
    /// Free-text note.
    pub note: String,
}

/// Whether an operation class moves goods onto or off a machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationFlow {
    /// Goods enter the machine.
    Entry,
    /// Goods leave the machine.
    Exit,
    /// Neither direction (e.g. machine selection, inspection).
    Neutral,
}

impl OperationFlow {
    /// Converts this flow to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Entry => "entry",
            Self::Exit => "exit",
            Self::Neutral => "neutral",
        }
    }
}

impl FromStr for OperationFlow {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "entry" => Ok(Self::Entry),
            "exit" => Ok(Self::Exit),
            "neutral" => Ok(Self::Neutral),
            _ => Err(DomainError::InvalidOperationFlow(s.to_string())),
        }
    }
}

impl std::fmt::Display for OperationFlow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The display classification of a machine in the status view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MachineActivity {
    /// No reading, or the latest reading carries no ticket.
    Free,
    /// Latest reading's operation class is an entry.
    In,
    /// Latest reading's operation class is an exit.
    Out,
    /// Latest reading's operation class is neither.
    Neutral,
}

/// Classifies a machine from its latest reading.
///
/// Priority order: no associated ticket means free regardless of the
/// operation class; otherwise the class flow decides.
#[must_use]
pub const fn classify_activity(latest: Option<(i32, OperationFlow)>) -> MachineActivity {
    match latest {
        None | Some((0, _)) => MachineActivity::Free,
        Some((_, OperationFlow::Entry)) => MachineActivity::In,
        Some((_, OperationFlow::Exit)) => MachineActivity::Out,
        Some((_, OperationFlow::Neutral)) => MachineActivity::Neutral,
    }
}
