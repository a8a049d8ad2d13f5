use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use tracing::{debug, info};

use super::{Timetable, timetable::validate_range};
use crate::{
    calendar::dates_between,
    errors::{TimetableError, TimetableResult},
    models::{Auditorium, Period, Professor, ReschedulingOption, Schedule},
    rescheduling::{self, Booking, SlotChange},
};

pub type DayOptions = BTreeMap<NaiveDate, Vec<ReschedulingOption>>;

impl Timetable {
    pub async fn available_professors(
        &self,
        date: NaiveDate,
        period: Period,
    ) -> TimetableResult<Vec<Professor>> {
        let mut professors = self
            .repos
            .professors
            .find_all_available(date, period)
            .await?;
        professors.sort();
        Ok(professors)
    }

    pub async fn available_auditoriums(
        &self,
        date: NaiveDate,
        period: Period,
    ) -> TimetableResult<Vec<Auditorium>> {
        let mut auditoriums = self
            .repos
            .auditoriums
            .find_all_available(date, period)
            .await?;
        auditoriums.sort();
        Ok(auditoriums)
    }

    /// Options free on `date` for the schedule, keyed by `date`.
    ///
    /// The map always holds exactly one entry, even when it is empty.
    pub async fn find_all_day_options_for(
        &self,
        week_parity: bool,
        date: NaiveDate,
        schedule: &Schedule,
    ) -> TimetableResult<DayOptions> {
        let day = date.weekday();
        let options = self.repos.options.find_all_by_day(day).await?;

        let booked = self.repos.schedules.find_all_in_range(date, date).await?;
        let recurring = self.repos.templates.find_all_by_day(week_parity, day).await?;

        let bookings: Vec<Booking> = booked
            .iter()
            .filter(|other| other.id != schedule.id)
            .map(Booking::from)
            .chain(
                recurring
                    .iter()
                    .filter(|template| Some(template.id) != schedule.template_id)
                    .map(Booking::from),
            )
            .collect();

        let free = rescheduling::free_options(options, &bookings, schedule);
        debug!(%date, week_parity, free = free.len(), "Resolved day options");

        Ok(BTreeMap::from([(date, free)]))
    }

    /// Free options for every date in `[from, to]`.
    pub async fn find_all_options_for(
        &self,
        schedule: &Schedule,
        from: NaiveDate,
        to: NaiveDate,
    ) -> TimetableResult<DayOptions> {
        validate_range(from, to)?;

        let mut all = DayOptions::new();
        for date in dates_between(from, to) {
            let week_parity = self.calendar.week_parity_of(date);
            all.extend(self.find_all_day_options_for(week_parity, date, schedule).await?);
        }
        Ok(all)
    }

    /// Moves one occurrence; the slot is not re-checked for conflicts.
    pub async fn reschedule_once(
        &self,
        schedule: Schedule,
        date: NaiveDate,
        option: &ReschedulingOption,
    ) -> TimetableResult<Schedule> {
        let change = SlotChange::new(date, option)?;
        let moved = rescheduling::reschedule_once(schedule, &change);

        info!(
            schedule_id = moved.id,
            %date,
            option_id = option.id,
            "Rescheduling once"
        );
        self.repos.schedules.update(moved).await
    }

    /// Replaces the professor; availability is not re-checked.
    pub async fn substitute_professor(
        &self,
        schedule: Schedule,
        professor: Professor,
    ) -> TimetableResult<Schedule> {
        info!(
            schedule_id = schedule.id,
            professor_id = professor.id,
            "Substituting professor"
        );
        let substituted = rescheduling::substitute_professor(schedule, professor);
        self.repos.schedules.update(substituted).await
    }

    /// Moves the schedule's template and every occurrence from `date` onwards.
    ///
    /// Fails before any write when the template cannot be resolved or the
    /// option does not fall on `date`'s weekday. The writes themselves
    /// commit or roll back together.
    pub async fn reschedule_permanently(
        &self,
        schedule: Schedule,
        date: NaiveDate,
        option: &ReschedulingOption,
    ) -> TimetableResult<Vec<Schedule>> {
        let template_id = schedule.template_id.ok_or_else(|| {
            TimetableError::Validation(format!(
                "Schedule with ID({}) was not generated from a template",
                schedule.id
            ))
        })?;
        let template = self.template(template_id).await?;

        let change = SlotChange::new(date, option)?;
        let week_parity = self.calendar.week_parity_of(date);

        info!(
            template_id,
            schedule_id = schedule.id,
            %date,
            week_parity,
            option_id = option.id,
            "Rescheduling permanently"
        );

        let updated = self
            .repos
            .schedules
            .reschedule_permanently(
                rescheduling::retarget_template(template, week_parity, &change),
                rescheduling::reschedule_once(schedule, &change),
                date,
                self.calendar.start(),
            )
            .await?;
        debug!(template_id, updated, "Moved future occurrences");

        let mut schedules = self
            .repos
            .schedules
            .find_all_by_template_id(template_id)
            .await?;
        schedules.sort();
        Ok(schedules)
    }

    /// Generates and stores the occurrences of every template in `[from, to]`.
    pub async fn generate_schedules(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> TimetableResult<Vec<Schedule>> {
        validate_range(from, to)?;

        let templates = self.repos.templates.find_all().await?;
        let generated = rescheduling::expand_templates(&templates, &self.calendar, from, to);
        if generated.is_empty() {
            return Ok(Vec::new());
        }

        info!(%from, %to, count = generated.len(), "Generating schedules from templates");
        let mut schedules = self.repos.schedules.create_all(generated).await?;
        schedules.sort();
        Ok(schedules)
    }
}
