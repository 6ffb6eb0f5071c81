mod common;

use alcina_profile::domain::model::FieldId;
use alcina_profile::{FileDraftStore, FormController, HttpProfileGateway, PageContext};
use anyhow::Result;
use common::RecordingSurface;
use tempfile::TempDir;

fn page(raw: &str) -> PageContext {
    PageContext::parse(raw).unwrap()
}

fn controller(dir: &TempDir) -> FormController<HttpProfileGateway, FileDraftStore> {
    // The gateway is never exercised in these tests.
    FormController::new(
        HttpProfileGateway::new("http://127.0.0.1:1".to_string()),
        FileDraftStore::new(dir.path()),
    )
}

#[tokio::test]
async fn test_draft_round_trip_across_page_loads() -> Result<()> {
    let temp_dir = TempDir::new()?;

    // First visit: fill the form field by field.
    let mut first = controller(&temp_dir);
    let mut surface = RecordingSurface::default();
    first.init(&page("file:///p.html?email=ada%40example.com"), &mut surface);
    first.on_field_blur(FieldId::Name, "Ada Lovelace", &mut surface);
    first.on_field_blur(FieldId::DateOfBirth, "1990-12-10", &mut surface);
    first.on_unknown_time_toggled(true, &mut surface);
    first.on_place_selected("London, United Kingdom", &mut surface);
    first.on_field_blur(FieldId::SunSign, "sagittarius", &mut surface);
    first.on_ascendant_changed("unknown", &mut surface);

    // Second visit: everything comes back, including the toggle state and
    // the advisory panel for the unknown ascendant.
    let mut second = controller(&temp_dir);
    let mut surface = RecordingSurface::default();
    second.init(&page("file:///p.html?email=ada%40example.com"), &mut surface);

    let filled = surface.filled.expect("saved draft restored");
    assert_eq!(filled.name, "Ada Lovelace");
    assert_eq!(filled.date_of_birth, "1990-12-10");
    assert_eq!(filled.birth_time, "");
    assert!(filled.unknown_time);
    assert_eq!(filled.birth_place, "London, United Kingdom");
    assert_eq!(filled.sun_sign, "sagittarius");
    assert_eq!(filled.ascendant_sign, "unknown");
    assert_eq!(filled.email, "ada@example.com");
    assert_eq!(surface.time_disabled, Some(true));
    assert_eq!(surface.advisory, Some(true));
    Ok(())
}

#[tokio::test]
async fn test_restored_draft_takes_email_from_page_context() -> Result<()> {
    let temp_dir = TempDir::new()?;

    let mut first = controller(&temp_dir);
    let mut surface = RecordingSurface::default();
    first.init(&page("file:///p.html?email=old%40example.com"), &mut surface);
    first.on_field_blur(FieldId::Name, "Ada Lovelace", &mut surface);

    let mut second = controller(&temp_dir);
    let mut surface = RecordingSurface::default();
    second.init(&page("file:///p.html?email=new%40example.com"), &mut surface);

    let filled = surface.filled.expect("saved draft restored");
    assert_eq!(filled.email, "new@example.com");
    assert_eq!(filled.name, "Ada Lovelace");
    Ok(())
}

#[tokio::test]
async fn test_success_flag_skips_draft_restore() -> Result<()> {
    let temp_dir = TempDir::new()?;

    let mut first = controller(&temp_dir);
    let mut surface = RecordingSurface::default();
    first.init(&page("file:///p.html?email=ada%40example.com"), &mut surface);
    first.on_field_blur(FieldId::Name, "Ada Lovelace", &mut surface);

    let mut second = controller(&temp_dir);
    let mut surface = RecordingSurface::default();
    second.init(&page("file:///p.html?success=1"), &mut surface);

    assert!(surface.success_shown);
    assert!(surface.filled.is_none());
    Ok(())
}

#[tokio::test]
async fn test_corrupt_draft_file_starts_clean() -> Result<()> {
    let temp_dir = TempDir::new()?;
    std::fs::write(
        temp_dir
            .path()
            .join("alcina_profile_form_data.json"),
        b"{definitely not json",
    )?;

    let mut controller = controller(&temp_dir);
    let mut surface = RecordingSurface::default();
    controller.init(&page("file:///p.html?email=ada%40example.com"), &mut surface);

    assert!(surface.filled.is_none());
    assert!(surface.banners.is_empty());
    Ok(())
}
