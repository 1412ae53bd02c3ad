use crate::config::{CityEntry, DateEntry, Expectation, Scenario};
use crate::dates;
use crate::page::DeliveryForm;
use crate::{Error, Result};
use tracing::debug;

/// Drive one booking attempt on an already-opened form and assert the
/// scenario's declared outcome. Any element/timeout/text mismatch is a hard
/// failure; there is no retry.
pub async fn execute(form: &DeliveryForm<'_>, scenario: &Scenario) -> Result<()> {
    match &scenario.city {
        CityEntry::Value(city) => form.set_city(city).await?,
        CityEntry::Autocomplete { typed, pick } => {
            form.set_city_via_autocomplete(typed, pick).await?;
            let value = form.city_value().await?;
            if value != *pick {
                return Err(Error::AssertionFailed(format!(
                    "autocomplete filled city with '{}', expected '{}'",
                    value, pick
                )));
            }
        }
    }

    // Offsets resolve against "now" here, at execution time.
    let generated_date = match &scenario.date {
        DateEntry::DaysFromNow(days) => {
            let date = dates::booking_date(*days);
            form.set_date(&date).await?;
            Some(date)
        }
        DateEntry::Literal(text) => {
            form.set_date(text).await?;
            None
        }
        DateEntry::CalendarDaysFromNow(days) => {
            form.pick_date_in_calendar(&dates::day_of_month(*days), dates::crosses_month(*days))
                .await?;
            Some(dates::booking_date(*days))
        }
    };

    form.set_name(&scenario.full_name).await?;
    form.set_phone(&scenario.phone).await?;

    if scenario.agreement {
        form.toggle_agreement().await?;
        if !form.agreement_checked().await? {
            return Err(Error::ActionFailed(
                "agreement checkbox did not register the click".into(),
            ));
        }
    }

    form.submit().await?;
    debug!("submitted, expecting: {}", scenario.expect);

    match &scenario.expect {
        Expectation::Success => {
            // Validated at parse time: success scenarios use generated dates.
            let date = generated_date.ok_or_else(|| {
                Error::Config(format!(
                    "scenario '{}': success expectation needs a generated date",
                    scenario.name
                ))
            })?;
            form.wait_for_loading().await?;
            form.wait_for_success(&date).await?;
        }
        Expectation::FieldError { field, message } => {
            form.wait_for_field_error(*field, message).await?;
            if form.success_visible().await? {
                return Err(Error::AssertionFailed(format!(
                    "success notification appeared alongside '{}' error",
                    field
                )));
            }
        }
        Expectation::AgreementInvalid => {
            form.wait_for_agreement_invalid().await?;
            if form.success_visible().await? {
                return Err(Error::AssertionFailed(
                    "success notification appeared despite unchecked agreement".into(),
                ));
            }
        }
    }

    Ok(())
}
