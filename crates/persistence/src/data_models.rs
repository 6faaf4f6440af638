// Copyright (C) 2026 Rostra Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row structs and text conversions between stored rows and domain types.
//!
//! Dates and times are stored as ISO 8601 text. Parsing failures surface as
//! [`StoreError::CorruptRecord`] rather than panics: a damaged row must
//! never take the process down.

use std::str::FromStr;

use diesel::prelude::*;
use rostra_domain::{ChainId, PersonId, Roster, RosterShift, RosterStatus, UnmatchedEntry, VenueId};
use rostra_ledger::{Actor, EventPayload, HistoryEvent};
use time::macros::format_description;
use time::{Date, Time};

use crate::diesel_schema::{history_events, roster_shifts, rosters, unmatched_entries};
use crate::error::StoreError;

const DATE_FORMAT: &[time::format_description::BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");
const TIME_FORMAT: &[time::format_description::BorrowedFormatItem<'static>] =
    format_description!("[hour]:[minute]:[second]");

pub fn date_to_text(date: Date) -> Result<String, StoreError> {
    date.format(&DATE_FORMAT)
        .map_err(|e| StoreError::SerializationError(e.to_string()))
}

pub fn text_to_date(text: &str) -> Result<Date, StoreError> {
    Date::parse(text, &DATE_FORMAT)
        .map_err(|e| StoreError::CorruptRecord(format!("invalid date '{text}': {e}")))
}

pub fn time_to_text(time: Time) -> Result<String, StoreError> {
    time.format(&TIME_FORMAT)
        .map_err(|e| StoreError::SerializationError(e.to_string()))
}

pub fn text_to_time(text: &str) -> Result<Time, StoreError> {
    Time::parse(text, &TIME_FORMAT)
        .map_err(|e| StoreError::CorruptRecord(format!("invalid time '{text}': {e}")))
}

fn text_to_status(text: &str) -> Result<RosterStatus, StoreError> {
    RosterStatus::from_str(text).map_err(|e| StoreError::CorruptRecord(e.to_string()))
}

fn int_to_confidence(value: i32) -> Result<u8, StoreError> {
    u8::try_from(value)
        .map_err(|_| StoreError::CorruptRecord(format!("confidence {value} out of range")))
}

/// A roster row as stored.
#[derive(Debug, Clone, Queryable)]
pub struct RosterRow {
    pub roster_id: i64,
    pub venue_id: String,
    pub name: String,
    pub description: Option<String>,
    pub week_start: String,
    pub start_date: String,
    pub end_date: String,
    pub status: String,
    pub chain_id: String,
    pub version_number: i32,
    pub revision: i32,
    pub is_active: i32,
    pub created_by: String,
    pub created_at: String,
    pub published_at: Option<String>,
    pub published_by: Option<String>,
    pub source_file: Option<String>,
}

impl RosterRow {
    /// Converts a stored row into the domain roster.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::CorruptRecord`] when a date or status column
    /// cannot be interpreted.
    pub fn into_roster(self) -> Result<Roster, StoreError> {
        Ok(Roster {
            roster_id: self.roster_id,
            venue_id: VenueId::new(&self.venue_id),
            name: self.name,
            description: self.description,
            week_start: text_to_date(&self.week_start)?,
            start_date: text_to_date(&self.start_date)?,
            end_date: text_to_date(&self.end_date)?,
            status: text_to_status(&self.status)?,
            chain_id: ChainId::from_value(&self.chain_id),
            version_number: self.version_number,
            revision: self.revision,
            is_active: self.is_active != 0,
            created_by: self.created_by,
            created_at: self.created_at,
            published_at: self.published_at,
            published_by: self.published_by,
            source_file: self.source_file,
        })
    }
}

/// Insertable form of a roster.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = rosters)]
pub struct NewRosterRow {
    pub venue_id: String,
    pub name: String,
    pub description: Option<String>,
    pub week_start: String,
    pub start_date: String,
    pub end_date: String,
    pub status: String,
    pub chain_id: String,
    pub version_number: i32,
    pub revision: i32,
    pub is_active: i32,
    pub created_by: String,
    pub created_at: String,
    pub published_at: Option<String>,
    pub published_by: Option<String>,
    pub source_file: Option<String>,
}

impl NewRosterRow {
    /// Builds an insertable row from a domain roster.
    ///
    /// # Errors
    ///
    /// Returns an error if a date cannot be formatted.
    pub fn from_roster(roster: &Roster) -> Result<Self, StoreError> {
        Ok(Self {
            venue_id: roster.venue_id.value().to_string(),
            name: roster.name.clone(),
            description: roster.description.clone(),
            week_start: date_to_text(roster.week_start)?,
            start_date: date_to_text(roster.start_date)?,
            end_date: date_to_text(roster.end_date)?,
            status: roster.status.as_str().to_string(),
            chain_id: roster.chain_id.value().to_string(),
            version_number: roster.version_number,
            revision: roster.revision,
            is_active: i32::from(roster.is_active),
            created_by: roster.created_by.clone(),
            created_at: roster.created_at.clone(),
            published_at: roster.published_at.clone(),
            published_by: roster.published_by.clone(),
            source_file: roster.source_file.clone(),
        })
    }
}

/// A shift row as stored.
#[derive(Debug, Clone, Queryable)]
pub struct ShiftRow {
    pub shift_id: i64,
    pub roster_id: i64,
    pub user_id: Option<String>,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub break_minutes: i32,
    pub position: Option<String>,
    pub notes: Option<String>,
    pub original_name: Option<String>,
    pub has_conflict: i32,
    pub conflict_kind: Option<String>,
}

impl ShiftRow {
    /// Converts a stored row into the domain shift.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::CorruptRecord`] when a date or time column
    /// cannot be interpreted.
    pub fn into_shift(self) -> Result<RosterShift, StoreError> {
        Ok(RosterShift {
            shift_id: self.shift_id,
            roster_id: self.roster_id,
            user_id: self.user_id.as_deref().map(PersonId::new),
            date: text_to_date(&self.date)?,
            start_time: text_to_time(&self.start_time)?,
            end_time: text_to_time(&self.end_time)?,
            break_minutes: self.break_minutes,
            position: self.position,
            notes: self.notes,
            original_name: self.original_name,
            has_conflict: self.has_conflict != 0,
            conflict_kind: self.conflict_kind,
        })
    }
}

/// Insertable form of a shift.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = roster_shifts)]
pub struct NewShiftRow {
    pub roster_id: i64,
    pub user_id: Option<String>,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub break_minutes: i32,
    pub position: Option<String>,
    pub notes: Option<String>,
    pub original_name: Option<String>,
    pub has_conflict: i32,
    pub conflict_kind: Option<String>,
}

impl NewShiftRow {
    /// Builds an insertable row owned by `roster_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if a date or time cannot be formatted.
    pub fn from_shift(shift: &RosterShift, roster_id: i64) -> Result<Self, StoreError> {
        Ok(Self {
            roster_id,
            user_id: shift.user_id.as_ref().map(|id| id.value().to_string()),
            date: date_to_text(shift.date)?,
            start_time: time_to_text(shift.start_time)?,
            end_time: time_to_text(shift.end_time)?,
            break_minutes: shift.break_minutes,
            position: shift.position.clone(),
            notes: shift.notes.clone(),
            original_name: shift.original_name.clone(),
            has_conflict: i32::from(shift.has_conflict),
            conflict_kind: shift.conflict_kind.clone(),
        })
    }
}

/// An unmatched entry row as stored.
#[derive(Debug, Clone, Queryable)]
pub struct UnmatchedRow {
    pub entry_id: i64,
    pub roster_id: i64,
    pub original_name: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub break_minutes: i32,
    pub position: Option<String>,
    pub suggested_user_id: Option<String>,
    pub confidence: i32,
    pub resolved: i32,
    pub resolved_user_id: Option<String>,
}

impl UnmatchedRow {
    /// Converts a stored row into the domain entry.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::CorruptRecord`] when a column cannot be
    /// interpreted.
    pub fn into_entry(self) -> Result<UnmatchedEntry, StoreError> {
        Ok(UnmatchedEntry {
            entry_id: self.entry_id,
            roster_id: self.roster_id,
            original_name: self.original_name,
            date: text_to_date(&self.date)?,
            start_time: text_to_time(&self.start_time)?,
            end_time: text_to_time(&self.end_time)?,
            break_minutes: self.break_minutes,
            position: self.position,
            suggested_user_id: self.suggested_user_id.as_deref().map(PersonId::new),
            confidence: int_to_confidence(self.confidence)?,
            resolved: self.resolved != 0,
            resolved_user_id: self.resolved_user_id.as_deref().map(PersonId::new),
        })
    }
}

/// Insertable form of an unmatched entry.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = unmatched_entries)]
pub struct NewUnmatchedRow {
    pub roster_id: i64,
    pub original_name: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub break_minutes: i32,
    pub position: Option<String>,
    pub suggested_user_id: Option<String>,
    pub confidence: i32,
    pub resolved: i32,
    pub resolved_user_id: Option<String>,
}

impl NewUnmatchedRow {
    /// Builds an insertable row owned by `roster_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if a date or time cannot be formatted.
    pub fn from_entry(entry: &UnmatchedEntry, roster_id: i64) -> Result<Self, StoreError> {
        Ok(Self {
            roster_id,
            original_name: entry.original_name.clone(),
            date: date_to_text(entry.date)?,
            start_time: time_to_text(entry.start_time)?,
            end_time: time_to_text(entry.end_time)?,
            break_minutes: entry.break_minutes,
            position: entry.position.clone(),
            suggested_user_id: entry
                .suggested_user_id
                .as_ref()
                .map(|id| id.value().to_string()),
            confidence: i32::from(entry.confidence),
            resolved: i32::from(entry.resolved),
            resolved_user_id: entry
                .resolved_user_id
                .as_ref()
                .map(|id| id.value().to_string()),
        })
    }
}

/// A history event row as stored.
#[derive(Debug, Clone, Queryable)]
pub struct EventRow {
    pub event_id: i64,
    pub roster_id: i64,
    pub chain_id: String,
    pub version: i32,
    pub action: String,
    pub payload_json: String,
    pub actor_json: String,
    pub before_status: Option<String>,
    pub after_status: String,
    pub recorded_at: String,
}

impl EventRow {
    /// Converts a stored row into the domain event.
    ///
    /// The action tag is re-derived from the payload so a row whose action
    /// column disagrees with its payload surfaces as corrupt.
    ///
    /// # Errors
    ///
    /// Returns an error when JSON or status columns cannot be interpreted.
    pub fn into_event(self) -> Result<HistoryEvent, StoreError> {
        let payload: EventPayload = serde_json::from_str(&self.payload_json)?;
        if payload.action().as_str() != self.action {
            return Err(StoreError::CorruptRecord(format!(
                "event {} action '{}' disagrees with payload",
                self.event_id, self.action
            )));
        }
        let actor: Actor = serde_json::from_str(&self.actor_json)?;
        let before_status: Option<RosterStatus> = self
            .before_status
            .as_deref()
            .map(text_to_status)
            .transpose()?;
        let after_status: RosterStatus = text_to_status(&self.after_status)?;

        Ok(HistoryEvent::new(
            self.roster_id,
            self.chain_id,
            self.version,
            payload,
            actor,
            before_status,
            after_status,
            self.recorded_at,
        ))
    }
}

/// Insertable form of a history event.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = history_events)]
pub struct NewEventRow {
    pub roster_id: i64,
    pub chain_id: String,
    pub version: i32,
    pub action: String,
    pub payload_json: String,
    pub actor_json: String,
    pub before_status: Option<String>,
    pub after_status: String,
    pub recorded_at: String,
}

impl NewEventRow {
    /// Builds an insertable row, stamping `roster_id` over the event's own
    /// (creation events carry zero until the database assigns an id).
    ///
    /// # Errors
    ///
    /// Returns an error if the payload or actor cannot be serialized.
    pub fn from_event(event: &HistoryEvent, roster_id: i64) -> Result<Self, StoreError> {
        Ok(Self {
            roster_id,
            chain_id: event.chain_id.clone(),
            version: event.version,
            action: event.action.as_str().to_string(),
            payload_json: serde_json::to_string(&event.payload)?,
            actor_json: serde_json::to_string(&event.actor)?,
            before_status: event
                .before_status
                .map(|status| status.as_str().to_string()),
            after_status: event.after_status.as_str().to_string(),
            recorded_at: event.recorded_at.clone(),
        })
    }
}
