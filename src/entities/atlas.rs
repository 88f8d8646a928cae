use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::{Geo, Location, Mode};
use crate::error::{completeness_error, lookup_error, validation_error, Error};

/// Handle to a location held by an [`Atlas`]. Handles carry identity: two
/// locations with an identical address are still distinct counterparts.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct LocationId(Uuid);

/// Handle to a location added through [`Atlas::add_origin`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct OriginId(LocationId);

/// Handle to a location added through [`Atlas::add_destination`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct DestinationId(LocationId);

impl From<OriginId> for LocationId {
    fn from(id: OriginId) -> Self {
        id.0
    }
}

impl From<DestinationId> for LocationId {
    fn from(id: DestinationId) -> Self {
        id.0
    }
}

#[derive(Clone, Copy)]
enum Table {
    Times,
    Impacts,
}

impl Table {
    fn noun(&self) -> &'static str {
        match self {
            Table::Times => "times",
            Table::Impacts => "impacts",
        }
    }
}

type ModeTable = HashMap<Mode, HashMap<LocationId, f64>>;

struct Entry {
    location: Location,
    times: ModeTable,
    impacts: ModeTable,
    current_destination: Option<DestinationId>,
}

impl Entry {
    fn new(location: Location) -> Self {
        Self {
            location,
            times: ModeTable::new(),
            impacts: ModeTable::new(),
            current_destination: None,
        }
    }

    fn table(&self, table: Table) -> &ModeTable {
        match table {
            Table::Times => &self.times,
            Table::Impacts => &self.impacts,
        }
    }

    fn table_mut(&mut self, table: Table) -> &mut ModeTable {
        match table {
            Table::Times => &mut self.times,
            Table::Impacts => &mut self.impacts,
        }
    }
}

/// Arena of locations. Times and impacts between two locations are kept
/// mirrored: after a write, both endpoints report the same value for the
/// (mode, counterpart) pair.
pub struct Atlas {
    entries: HashMap<LocationId, Entry>,
}

impl Atlas {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    pub fn add_location(&mut self, location: Location) -> LocationId {
        let id = LocationId(location.token);
        self.entries.insert(id, Entry::new(location));
        id
    }

    pub fn add_origin(&mut self, location: Location) -> OriginId {
        OriginId(self.add_location(location))
    }

    pub fn add_destination(&mut self, location: Location) -> DestinationId {
        DestinationId(self.add_location(location))
    }

    pub fn location(&self, id: impl Into<LocationId>) -> Result<&Location, Error> {
        Ok(&self.entry(id.into())?.location)
    }

    /// A `None` geo keeps whatever was recorded before.
    pub fn set_geo(&mut self, id: impl Into<LocationId>, geo: Option<Geo>) -> Result<(), Error> {
        let entry = self.entry_mut(id.into())?;

        if let Some(geo) = geo {
            entry.location.geo = Some(geo);
        }

        Ok(())
    }

    pub fn set_mode(&mut self, id: impl Into<LocationId>, mode: Mode) -> Result<(), Error> {
        self.entry_mut(id.into())?.location.mode = mode;
        Ok(())
    }

    pub fn set_time(
        &mut self,
        mode: Mode,
        minutes: f64,
        from: impl Into<LocationId>,
        to: impl Into<LocationId>,
    ) -> Result<(), Error> {
        self.record(Table::Times, mode, minutes, from.into(), to.into())
    }

    pub fn set_impact(
        &mut self,
        mode: Mode,
        minutes: f64,
        from: impl Into<LocationId>,
        to: impl Into<LocationId>,
    ) -> Result<(), Error> {
        self.record(Table::Impacts, mode, minutes, from.into(), to.into())
    }

    /// The stored time for the (mode, counterpart) pair. `mode` defaults to
    /// the current mode of `from`.
    pub fn time_between(
        &self,
        from: impl Into<LocationId>,
        to: impl Into<LocationId>,
        mode: Option<Mode>,
    ) -> Result<f64, Error> {
        self.between(Table::Times, from.into(), to.into(), mode)
    }

    pub fn impact_between(
        &self,
        from: impl Into<LocationId>,
        to: impl Into<LocationId>,
        mode: Option<Mode>,
    ) -> Result<f64, Error> {
        self.between(Table::Impacts, from.into(), to.into(), mode)
    }

    /// All times recorded for the resolved mode, without counterpart
    /// identities. Empty when the mode has no entries yet.
    pub fn times(&self, id: impl Into<LocationId>, mode: Option<Mode>) -> Result<Vec<f64>, Error> {
        self.values(Table::Times, id.into(), mode)
    }

    pub fn impacts(
        &self,
        id: impl Into<LocationId>,
        mode: Option<Mode>,
    ) -> Result<Vec<f64>, Error> {
        self.values(Table::Impacts, id.into(), mode)
    }

    /// Designates the reference destination the origin's impacts are measured
    /// against. Requires a recorded time for every mode; re-derives the impact
    /// of every known counterpart, overwriting earlier derivations.
    pub fn set_current_destination(
        &mut self,
        origin: OriginId,
        destination: DestinationId,
    ) -> Result<(), Error> {
        let origin_id = LocationId::from(origin);
        let destination_id = LocationId::from(destination);

        let times = &self.entry(origin_id)?.times;
        for mode in Mode::ALL {
            let recorded = times
                .get(&mode)
                .map_or(false, |table| table.contains_key(&destination_id));

            if !recorded {
                return Err(completeness_error(format!(
                    "a destination can only become the current destination once \
                     times for fastest, public transport and car are all \
                     recorded for it, {} is missing",
                    mode
                )));
            }
        }

        self.entry_mut(origin_id)?.current_destination = Some(destination);

        for mode in Mode::ALL {
            let baseline = self.time_between(origin_id, destination_id, Some(mode))?;
            let recorded: Vec<(LocationId, f64)> = self
                .entry(origin_id)?
                .times
                .get(&mode)
                .map(|table| table.iter().map(|(id, minutes)| (*id, *minutes)).collect())
                .unwrap_or_default();

            // The mirrored write lands the derived impact on each counterpart
            // as well; the baseline destination itself derives impact zero.
            for (counterpart, minutes) in recorded {
                self.record(Table::Impacts, mode, minutes - baseline, origin_id, counterpart)?;
            }
        }

        Ok(())
    }

    pub fn current_destination(&self, origin: OriginId) -> Result<Option<DestinationId>, Error> {
        Ok(self.entry(origin.into())?.current_destination)
    }

    /// Arithmetic mean over the destination's recorded times for the resolved
    /// mode. A mode without entries is a lookup failure.
    pub fn avg_time(
        &self,
        destination: DestinationId,
        mode: Option<Mode>,
    ) -> Result<f64, Error> {
        self.average(Table::Times, destination.into(), mode)
    }

    pub fn avg_impact(
        &self,
        destination: DestinationId,
        mode: Option<Mode>,
    ) -> Result<f64, Error> {
        self.average(Table::Impacts, destination.into(), mode)
    }

    fn entry(&self, id: LocationId) -> Result<&Entry, Error> {
        self.entries
            .get(&id)
            .ok_or_else(|| validation_error("unknown location handle"))
    }

    fn entry_mut(&mut self, id: LocationId) -> Result<&mut Entry, Error> {
        self.entries
            .get_mut(&id)
            .ok_or_else(|| validation_error("unknown location handle"))
    }

    fn record(
        &mut self,
        table: Table,
        mode: Mode,
        minutes: f64,
        from: LocationId,
        to: LocationId,
    ) -> Result<(), Error> {
        if !minutes.is_finite() {
            return Err(validation_error(format!(
                "{} represent minutes and should be finite, got {}",
                table.noun(),
                minutes
            )));
        }

        if from == to {
            return Err(validation_error(
                "a location cannot record a value to itself",
            ));
        }

        self.entry(from)?;
        self.entry(to)?;

        // Local side first, then the counterpart, so the relation stays
        // mirrored without the counterpart writing back.
        self.entry_mut(from)?
            .table_mut(table)
            .entry(mode)
            .or_default()
            .insert(to, minutes);
        self.entry_mut(to)?
            .table_mut(table)
            .entry(mode)
            .or_default()
            .insert(from, minutes);

        Ok(())
    }

    fn between(
        &self,
        table: Table,
        from: LocationId,
        to: LocationId,
        mode: Option<Mode>,
    ) -> Result<f64, Error> {
        let entry = self.entry(from)?;
        let mode = mode.unwrap_or(entry.location.mode);

        entry
            .table(table)
            .get(&mode)
            .and_then(|values| values.get(&to))
            .copied()
            .ok_or_else(|| {
                lookup_error(format!(
                    "no {} recorded for mode {} to that counterpart",
                    table.noun(),
                    mode
                ))
            })
    }

    fn values(&self, table: Table, id: LocationId, mode: Option<Mode>) -> Result<Vec<f64>, Error> {
        let entry = self.entry(id)?;
        let mode = mode.unwrap_or(entry.location.mode);

        Ok(entry
            .table(table)
            .get(&mode)
            .map(|values| values.values().copied().collect())
            .unwrap_or_default())
    }

    fn average(&self, table: Table, id: LocationId, mode: Option<Mode>) -> Result<f64, Error> {
        let entry = self.entry(id)?;
        let mode = mode.unwrap_or(entry.location.mode);

        let values = entry
            .table(table)
            .get(&mode)
            .filter(|values| !values.is_empty())
            .ok_or_else(|| {
                lookup_error(format!("no {} recorded for mode {}", table.noun(), mode))
            })?;

        Ok(values.values().sum::<f64>() / values.len() as f64)
    }
}

impl Default for Atlas {
    fn default() -> Self {
        Self::new()
    }
}
