//! Page object for the delivery-booking form.
//!
//! Maps semantic field names to locators and hides selector strings from
//! scenario logic. Every wait is bounded polling against UI state with the
//! suite timeout; hitting the deadline is a hard failure.

use crate::{Error, Result};
use eoka::Page;
use serde::Deserialize;
use std::fmt;
use std::time::{Duration, Instant};
use tracing::debug;

pub const CITY_INPUT: &str = "[data-test-id='city'] input";
pub const DATE_INPUT: &str = "[data-test-id='date'] input";
pub const NAME_INPUT: &str = "[data-test-id='name'] input";
pub const PHONE_INPUT: &str = "[data-test-id='phone'] input";
pub const AGREEMENT: &str = "[data-test-id='agreement']";
pub const AGREEMENT_BOX: &str = "[data-test-id='agreement'] .checkbox__box";
pub const AGREEMENT_CONTROL: &str = "[data-test-id='agreement'] .checkbox__control";
pub const SUBMIT_BUTTON: &str = ".button";
pub const LOADING_ICON: &str = ".button__icon";
pub const SUCCESS_NOTIFICATION: &str = ".notification__content";
pub const CITY_MENU_ITEM: &str = ".menu-item__control";
pub const CALENDAR_DAY: &str = ".calendar__day";
pub const CALENDAR_NEXT_MONTH: &str = ".calendar__arrow_direction_right[data-step='1']";

/// Class the form puts on a field container (and on the agreement control)
/// when validation rejects it.
pub const INVALID_MARKER: &str = "input_invalid";

/// Sub-element inside an invalid container that carries the message text.
const INPUT_SUB: &str = ".input__sub";

/// Form fields that can carry a per-field validation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    City,
    Date,
    Name,
    Phone,
}

impl Field {
    /// Container element carrying `data-test-id` and the invalid marker class.
    pub fn container(&self) -> &'static str {
        match self {
            Self::City => "[data-test-id='city']",
            Self::Date => "[data-test-id='date']",
            Self::Name => "[data-test-id='name']",
            Self::Phone => "[data-test-id='phone']",
        }
    }

    /// The text input inside the container.
    pub fn input(&self) -> &'static str {
        match self {
            Self::City => CITY_INPUT,
            Self::Date => DATE_INPUT,
            Self::Name => NAME_INPUT,
            Self::Phone => PHONE_INPUT,
        }
    }

    /// Selector for the validation message, only matching while the invalid
    /// marker is present. For city/name/phone the marker lands on the
    /// container itself; for date it lands on an inner wrapper, so the date
    /// selector uses the descendant form.
    pub fn error_selector(&self) -> String {
        match self {
            Self::Date => format!("{} .{} {}", self.container(), INVALID_MARKER, INPUT_SUB),
            _ => format!("{}.{} {}", self.container(), INVALID_MARKER, INPUT_SUB),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::City => "city",
            Self::Date => "date",
            Self::Name => "name",
            Self::Phone => "phone",
        };
        f.write_str(name)
    }
}

/// One open delivery form, bound to a page for its lifetime.
pub struct DeliveryForm<'a> {
    page: &'a Page,
    timeout_ms: u64,
}

impl<'a> DeliveryForm<'a> {
    pub fn new(page: &'a Page, timeout_ms: u64) -> Self {
        Self { page, timeout_ms }
    }

    /// The underlying page, for ad-hoc checks in tests.
    pub fn page(&self) -> &Page {
        self.page
    }

    // =========================================================================
    // Filling
    // =========================================================================

    pub async fn set_city(&self, city: &str) -> Result<()> {
        debug!("city = '{}'", city);
        self.page.fill(CITY_INPUT, city).await?;
        Ok(())
    }

    /// Type a fragment into the city field, wait for the autocomplete
    /// dropdown, and click the entry containing `pick`.
    pub async fn set_city_via_autocomplete(&self, typed: &str, pick: &str) -> Result<()> {
        debug!("city autocomplete: '{}' -> '{}'", typed, pick);
        self.page.fill(CITY_INPUT, typed).await?;
        self.page
            .wait_for_visible(CITY_MENU_ITEM, self.timeout_ms)
            .await
            .map_err(|_| {
                Error::Timeout(format!(
                    "city dropdown did not open for '{}' within {}ms",
                    typed, self.timeout_ms
                ))
            })?;
        self.click_entry(CITY_MENU_ITEM, pick, false).await
    }

    /// Current value of the city input.
    pub async fn city_value(&self) -> Result<String> {
        let js = format!(
            "document.querySelector({})?.value ?? ''",
            js_string(CITY_INPUT)
        );
        let value: String = self.page.evaluate(&js).await?;
        Ok(value)
    }

    /// Clear the pre-filled default (select-all + Backspace) and type `date`.
    /// An empty `date` leaves the field cleared.
    pub async fn set_date(&self, date: &str) -> Result<()> {
        debug!("date = '{}'", date);
        self.focus(DATE_INPUT).await?;
        self.page
            .execute(&format!(
                "document.querySelector({})?.select()",
                js_string(DATE_INPUT)
            ))
            .await?;
        self.page.human().press_key("Backspace").await?;
        if !date.is_empty() {
            self.page.type_text(date).await?;
        }
        Ok(())
    }

    /// Pick a day through the calendar popup. Clicking the date input opens
    /// it; when the target falls in the next calendar month the right arrow
    /// is clicked once first. `day` is the cell label, no leading zero.
    pub async fn pick_date_in_calendar(&self, day: &str, advance_month: bool) -> Result<()> {
        debug!("calendar day = '{}' (advance: {})", day, advance_month);
        self.page.click(DATE_INPUT).await?;
        self.page
            .wait_for_visible(CALENDAR_DAY, self.timeout_ms)
            .await
            .map_err(|_| {
                Error::Timeout(format!(
                    "calendar popup did not open within {}ms",
                    self.timeout_ms
                ))
            })?;
        if advance_month {
            let before = self.calendar_snapshot().await?;
            self.page.click(CALENDAR_NEXT_MONTH).await?;
            self.wait_until(
                &calendar_changed_js(&before),
                "calendar did not advance to the next month",
            )
            .await?;
        }
        // Exact match: day "7" must not hit the "17" cell.
        self.click_entry(CALENDAR_DAY, day, true).await
    }

    pub async fn set_name(&self, name: &str) -> Result<()> {
        debug!("name = '{}'", name);
        self.page.fill(NAME_INPUT, name).await?;
        Ok(())
    }

    pub async fn set_phone(&self, phone: &str) -> Result<()> {
        debug!("phone = '{}'", phone);
        self.page.fill(PHONE_INPUT, phone).await?;
        Ok(())
    }

    /// Click the agreement checkbox box.
    pub async fn toggle_agreement(&self) -> Result<()> {
        debug!("toggle agreement");
        self.page.click(AGREEMENT_BOX).await?;
        Ok(())
    }

    /// Whether the agreement control input is checked.
    pub async fn agreement_checked(&self) -> Result<bool> {
        let js = format!(
            "!!document.querySelector({})?.checked",
            js_string(AGREEMENT_CONTROL)
        );
        let checked: bool = self.page.evaluate(&js).await?;
        Ok(checked)
    }

    pub async fn submit(&self) -> Result<()> {
        debug!("submit");
        self.page.click(SUBMIT_BUTTON).await?;
        Ok(())
    }

    // =========================================================================
    // Outcome assertions
    // =========================================================================

    /// The loading icon must appear on the submit button after a valid submit.
    pub async fn wait_for_loading(&self) -> Result<()> {
        self.page
            .wait_for_visible(LOADING_ICON, self.timeout_ms)
            .await
            .map_err(|_| {
                Error::Timeout(format!(
                    "loading indicator did not appear within {}ms",
                    self.timeout_ms
                ))
            })?;
        Ok(())
    }

    /// The success notification must become visible and contain the booked
    /// date text.
    pub async fn wait_for_success(&self, expected_date: &str) -> Result<()> {
        self.page
            .wait_for_visible(SUCCESS_NOTIFICATION, self.timeout_ms)
            .await
            .map_err(|_| {
                Error::Timeout(format!(
                    "success notification did not appear within {}ms",
                    self.timeout_ms
                ))
            })?;
        let text = self.text_of(SUCCESS_NOTIFICATION).await?;
        if !text.contains(expected_date) {
            return Err(Error::AssertionFailed(format!(
                "success notification '{}' does not contain date '{}'",
                text, expected_date
            )));
        }
        Ok(())
    }

    /// Whether the success notification is currently visible.
    pub async fn success_visible(&self) -> Result<bool> {
        self.is_visible(SUCCESS_NOTIFICATION).await
    }

    /// Wait for the field to carry the invalid marker and its sub-message to
    /// show exactly `expected`.
    pub async fn wait_for_field_error(&self, field: Field, expected: &str) -> Result<()> {
        let selector = field.error_selector();
        self.page
            .wait_for_visible(&selector, self.timeout_ms)
            .await
            .map_err(|_| {
                Error::Timeout(format!(
                    "no validation message on '{}' within {}ms",
                    field, self.timeout_ms
                ))
            })?;
        let text = self.text_of(&selector).await?;
        if text != expected {
            return Err(Error::AssertionFailed(format!(
                "'{}' message mismatch: expected '{}', got '{}'",
                field, expected, text
            )));
        }
        Ok(())
    }

    /// Validation message currently shown under a field, if any.
    pub async fn field_error(&self, field: Field) -> Result<Option<String>> {
        let selector = field.error_selector();
        if !self.is_visible(&selector).await? {
            return Ok(None);
        }
        Ok(Some(self.text_of(&selector).await?))
    }

    /// Wait for the agreement control to carry the invalid marker. The
    /// agreement has no sub-message, only the class.
    pub async fn wait_for_agreement_invalid(&self) -> Result<()> {
        let js = format!(
            "!!document.querySelector({})?.classList.contains('{}')",
            js_string(AGREEMENT),
            INVALID_MARKER
        );
        self.wait_until(&js, "agreement invalid marker").await
    }

    // =========================================================================
    // Internal
    // =========================================================================

    /// Rendered day-cell labels, joined. Adjacent months never render the
    /// same sequence, so a change of this snapshot means the popup
    /// re-rendered for the next month.
    async fn calendar_snapshot(&self) -> Result<String> {
        let snapshot: String = self.page.evaluate(&calendar_snapshot_js()).await?;
        Ok(snapshot)
    }

    async fn focus(&self, selector: &str) -> Result<()> {
        self.page
            .execute(&format!(
                "document.querySelector({})?.focus()",
                js_string(selector)
            ))
            .await?;
        Ok(())
    }

    async fn text_of(&self, selector: &str) -> Result<String> {
        let js = format!(
            "(document.querySelector({})?.textContent ?? '').trim()",
            js_string(selector)
        );
        let text: String = self.page.evaluate(&js).await?;
        Ok(text)
    }

    async fn is_visible(&self, selector: &str) -> Result<bool> {
        let js = format!(
            r#"(() => {{
                const el = document.querySelector({});
                if (!el) return false;
                const rect = el.getBoundingClientRect();
                return rect.width > 0 && rect.height > 0;
            }})()"#,
            js_string(selector)
        );
        let visible: bool = self.page.evaluate(&js).await?;
        Ok(visible)
    }

    /// Click the first element under `list_selector` whose trimmed text
    /// matches `needle` (exact or substring). Used for autocomplete entries
    /// and calendar day cells, which have no stable per-item selector.
    async fn click_entry(&self, list_selector: &str, needle: &str, exact: bool) -> Result<()> {
        let arg = serde_json::json!({ "sel": list_selector, "needle": needle, "exact": exact });
        let js = format!(
            r#"(() => {{
                const arg = {arg};
                for (const el of document.querySelectorAll(arg.sel)) {{
                    const text = (el.textContent || '').trim();
                    if (arg.exact ? text === arg.needle : text.includes(arg.needle)) {{
                        el.click();
                        return true;
                    }}
                }}
                return false;
            }})()"#,
            arg = serde_json::to_string(&arg).unwrap()
        );
        let clicked: bool = self.page.evaluate(&js).await?;
        if !clicked {
            return Err(Error::ActionFailed(format!(
                "no '{}' entry matching '{}'",
                list_selector, needle
            )));
        }
        Ok(())
    }

    /// Poll a boolean JS expression every 100ms until it holds or the
    /// timeout elapses.
    async fn wait_until(&self, js: &str, what: &str) -> Result<()> {
        let deadline = Instant::now() + Duration::from_millis(self.timeout_ms);
        loop {
            let done: bool = self.page.evaluate(js).await?;
            if done {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(Error::Timeout(format!(
                    "{} (waited {}ms)",
                    what, self.timeout_ms
                )));
            }
            self.page.wait(100).await;
        }
    }
}

fn js_string(s: &str) -> String {
    serde_json::to_string(s).unwrap()
}

fn calendar_snapshot_js() -> String {
    format!(
        "Array.from(document.querySelectorAll({})).map(el => (el.textContent || '').trim()).join(',')",
        js_string(CALENDAR_DAY)
    )
}

fn calendar_changed_js(before: &str) -> String {
    format!(
        "({}) !== {}",
        calendar_snapshot_js(),
        js_string(before)
    )
}
