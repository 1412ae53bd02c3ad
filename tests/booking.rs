//! Integration tests for the delivery-booking suite.
//!
//! These require Chrome and the booking form served at http://localhost:9999.
//! Run with: cargo test --test booking -- --ignored

use delivery_e2e::{
    dates, messages, BrowserConfig, CityEntry, DateEntry, DeliveryForm, Expectation, Field,
    Runner, Scenario, Suite, TargetUrl,
};

const BASE_URL: &str = "http://localhost:9999";

/// Check if Chrome is available
fn chrome_available() -> bool {
    eoka::stealth::patcher::find_chrome().is_ok()
}

fn suite(scenarios: Vec<Scenario>) -> Suite {
    Suite {
        name: "booking".into(),
        browser: BrowserConfig {
            headless: true,
            ..Default::default()
        },
        target: TargetUrl {
            url: BASE_URL.into(),
        },
        timeout_ms: 15_000,
        scenarios,
    }
}

/// All fields valid; tests override the one field they exercise.
fn valid_scenario(name: &str) -> Scenario {
    Scenario {
        name: name.into(),
        city: CityEntry::Value("Санкт-Петербург".into()),
        date: DateEntry::DaysFromNow(3),
        full_name: "Иванов Иван".into(),
        phone: "+79200000000".into(),
        agreement: true,
        expect: Expectation::Success,
    }
}

fn field_error(field: Field, message: &str) -> Expectation {
    Expectation::FieldError {
        field,
        message: message.into(),
    }
}

async fn run(scenarios: Vec<Scenario>) -> delivery_e2e::SuiteResult {
    let suite = suite(scenarios);
    let runner = Runner::new(&suite.browser)
        .await
        .expect("Failed to launch browser");
    let result = runner.run(&suite).await.expect("Failed to run suite");
    runner.close().await.expect("Failed to close browser");
    result
}

fn assert_all_passed(result: &delivery_e2e::SuiteResult) {
    for r in &result.results {
        assert!(
            r.passed,
            "scenario '{}' failed: {}",
            r.name,
            r.error.as_deref().unwrap_or("unknown")
        );
    }
}

#[tokio::test]
#[ignore = "requires Chrome and the form at localhost:9999"]
async fn test_valid_booking_shows_success_with_date() {
    if !chrome_available() {
        eprintln!("Chrome not found, skipping test");
        return;
    }

    let result = run(vec![valid_scenario("all fields valid")]).await;
    assert_all_passed(&result);
}

#[tokio::test]
#[ignore = "requires Chrome and the form at localhost:9999"]
async fn test_each_invalid_field_shows_its_exact_message() {
    if !chrome_available() {
        eprintln!("Chrome not found, skipping test");
        return;
    }

    let mut unsupported_city = valid_scenario("unsupported city");
    unsupported_city.city = CityEntry::Value("Гатчина".into());
    unsupported_city.expect = field_error(Field::City, messages::CITY_UNSUPPORTED);

    let mut empty_city = valid_scenario("empty city");
    empty_city.city = CityEntry::Value(String::new());
    empty_city.expect = field_error(Field::City, messages::REQUIRED_FIELD);

    let mut date_too_soon = valid_scenario("date too soon");
    date_too_soon.date = DateEntry::DaysFromNow(2);
    date_too_soon.expect = field_error(Field::Date, messages::DATE_TOO_SOON);

    let mut empty_date = valid_scenario("empty date");
    empty_date.date = DateEntry::Literal(String::new());
    empty_date.expect = field_error(Field::Date, messages::DATE_INVALID);

    let mut latin_name = valid_scenario("latin name");
    latin_name.full_name = "f f".into();
    latin_name.expect = field_error(Field::Name, messages::NAME_INVALID);

    let mut empty_name = valid_scenario("empty name");
    empty_name.full_name = String::new();
    empty_name.expect = field_error(Field::Name, messages::REQUIRED_FIELD);

    let mut bad_phone = valid_scenario("phone without plus");
    bad_phone.phone = "79200000000".into();
    bad_phone.expect = field_error(Field::Phone, messages::PHONE_INVALID);

    let mut empty_phone = valid_scenario("empty phone");
    empty_phone.phone = String::new();
    empty_phone.expect = field_error(Field::Phone, messages::REQUIRED_FIELD);

    let result = run(vec![
        unsupported_city,
        empty_city,
        date_too_soon,
        empty_date,
        latin_name,
        empty_name,
        bad_phone,
        empty_phone,
    ])
    .await;
    assert_all_passed(&result);
}

#[tokio::test]
#[ignore = "requires Chrome and the form at localhost:9999"]
async fn test_unchecked_agreement_blocks_success() {
    if !chrome_available() {
        eprintln!("Chrome not found, skipping test");
        return;
    }

    let mut scenario = valid_scenario("unchecked agreement");
    scenario.agreement = false;
    scenario.expect = Expectation::AgreementInvalid;

    let result = run(vec![scenario]).await;
    assert_all_passed(&result);
}

#[tokio::test]
#[ignore = "requires Chrome and the form at localhost:9999"]
async fn test_city_autocomplete_fills_full_name() {
    if !chrome_available() {
        eprintln!("Chrome not found, skipping test");
        return;
    }

    let mut by_prefix = valid_scenario("prefix Са");
    by_prefix.city = CityEntry::Autocomplete {
        typed: "Са".into(),
        pick: "Санкт-Петербург".into(),
    };

    let mut by_substring = valid_scenario("substring ом");
    by_substring.city = CityEntry::Autocomplete {
        typed: "ом".into(),
        pick: "Томск".into(),
    };

    let result = run(vec![by_prefix, by_substring]).await;
    assert_all_passed(&result);
}

#[tokio::test]
#[ignore = "requires Chrome and the form at localhost:9999"]
async fn test_calendar_pick_matches_typed_date() {
    if !chrome_available() {
        eprintln!("Chrome not found, skipping test");
        return;
    }

    let mut typed = valid_scenario("typed week ahead");
    typed.date = DateEntry::DaysFromNow(7);

    let mut via_calendar = valid_scenario("calendar week ahead");
    via_calendar.date = DateEntry::CalendarDaysFromNow(7);

    let result = run(vec![typed, via_calendar]).await;
    assert_all_passed(&result);
}

#[tokio::test]
#[ignore = "requires Chrome and the form at localhost:9999"]
async fn test_invalid_city_error_is_reproducible() {
    if !chrome_available() {
        eprintln!("Chrome not found, skipping test");
        return;
    }

    // Same scenario twice, each on a fresh page: the single error message
    // must reproduce without accumulating state from the first run.
    let mut first = valid_scenario("unsupported city, first run");
    first.city = CityEntry::Value("Гатчина".into());
    first.expect = field_error(Field::City, messages::CITY_UNSUPPORTED);

    let mut second = first.clone();
    second.name = "unsupported city, second run".into();

    let result = run(vec![first, second]).await;
    assert_all_passed(&result);
}

#[tokio::test]
#[ignore = "requires Chrome and the form at localhost:9999"]
async fn test_field_error_reports_only_the_offending_field() {
    if !chrome_available() {
        eprintln!("Chrome not found, skipping test");
        return;
    }

    let browser = eoka::Browser::launch().await.expect("Failed to launch browser");
    let page = browser
        .new_page(BASE_URL)
        .await
        .expect("Failed to open form");
    let form = DeliveryForm::new(&page, 15_000);

    form.set_city("Гатчина").await.expect("Failed to set city");
    form.set_date(&dates::booking_date(3))
        .await
        .expect("Failed to set date");
    form.set_name("Иванов Иван").await.expect("Failed to set name");
    form.set_phone("+79200000000")
        .await
        .expect("Failed to set phone");
    form.toggle_agreement().await.expect("Failed to toggle agreement");
    form.submit().await.expect("Failed to submit");

    form.wait_for_field_error(Field::City, messages::CITY_UNSUPPORTED)
        .await
        .expect("City error did not appear");

    // Direct read-back: the city message is present, the valid fields are clean.
    assert_eq!(
        form.field_error(Field::City).await.unwrap().as_deref(),
        Some(messages::CITY_UNSUPPORTED)
    );
    assert_eq!(form.field_error(Field::Date).await.unwrap(), None);
    assert_eq!(form.field_error(Field::Name).await.unwrap(), None);
    assert_eq!(form.field_error(Field::Phone).await.unwrap(), None);

    // The form never navigates away on a validation error.
    let url = form.page().url().await.expect("Failed to read url");
    assert!(url.starts_with(BASE_URL), "url: {}", url);

    browser.close().await.expect("Failed to close browser");
}

#[tokio::test]
#[ignore = "requires Chrome and the form at localhost:9999"]
async fn test_builtin_suite_passes() {
    if !chrome_available() {
        eprintln!("Chrome not found, skipping test");
        return;
    }

    let suite = Suite::load("configs/delivery.yaml").expect("Failed to load suite");
    let runner = Runner::new(&suite.browser)
        .await
        .expect("Failed to launch browser");
    let result = runner.run(&suite).await.expect("Failed to run suite");
    runner.close().await.expect("Failed to close browser");

    assert_all_passed(&result);
    assert_eq!(result.results.len(), suite.scenarios.len());
}
