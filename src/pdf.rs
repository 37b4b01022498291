use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use image::DynamicImage;
use pdfium_render::prelude::*;

use crate::character::{ability_modifier, format_modifier, CharacterRecord};
use crate::error::AppError;

// A4 in points.
const PAGE_WIDTH: f32 = 595.28;
const PAGE_HEIGHT: f32 = 841.89;
const MARGIN: f32 = 36.0;
const CONTENT_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;

// Layout positions are written top-down; PDF coordinates grow upward.
fn from_top(y: f32) -> PdfPoints {
    PdfPoints::new(PAGE_HEIGHT - y)
}

fn text(
    page: &mut PdfPage,
    font: PdfFontToken,
    size: f32,
    x: f32,
    y: f32,
    content: &str,
) -> Result<(), PdfiumError> {
    page.objects_mut().create_text_object(
        PdfPoints::new(x),
        from_top(y + size),
        content,
        font,
        PdfPoints::new(size),
    )?;
    Ok(())
}

fn rect(page: &mut PdfPage, x: f32, y: f32, w: f32, h: f32) -> Result<(), PdfiumError> {
    let bounds = PdfRect::new(
        from_top(y + h),
        PdfPoints::new(x),
        from_top(y),
        PdfPoints::new(x + w),
    );
    page.objects_mut().create_path_object_rect(
        bounds,
        Some(PdfColor::new(0, 0, 0, 255)),
        Some(PdfPoints::new(0.75)),
        None,
    )?;
    Ok(())
}

fn decode_portrait(encoded: &str) -> Option<DynamicImage> {
    let bytes = BASE64.decode(encoded.trim()).ok()?;
    image::load_from_memory(&bytes).ok()
}

/// Lays out the full character sheet as a multi-page PDF and returns the
/// document bytes.
pub fn render_pdf(record: &CharacterRecord) -> Result<Vec<u8>, AppError> {
    let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
        .or_else(|_| Pdfium::bind_to_system_library())?;
    let pdfium = Pdfium::new(bindings);
    let mut document = pdfium.create_new_pdf()?;
    let regular = document.fonts_mut().helvetica();
    let bold = document.fonts_mut().helvetica_bold();

    // --- Page 1: header, portrait and combat stats ---
    let mut page = document
        .pages_mut()
        .create_page_at_end(PdfPagePaperSize::a4())?;
    let mut y = MARGIN;

    rect(&mut page, MARGIN, y, CONTENT_WIDTH, 30.0)?;
    text(&mut page, bold, 18.0, MARGIN + 160.0, y + 6.0, "D&D CHARACTER SHEET")?;
    y += 40.0;

    // Top info row: name, class and level, background, player name.
    rect(&mut page, MARGIN, y, CONTENT_WIDTH, 30.0)?;
    text(&mut page, regular, 8.0, MARGIN + 5.0, y + 2.0, "CHARACTER NAME")?;
    text(&mut page, regular, 12.0, MARGIN + 5.0, y + 13.0, &record.name)?;
    text(&mut page, regular, 8.0, MARGIN + 160.0, y + 2.0, "CLASS & LEVEL")?;
    text(
        &mut page,
        regular,
        12.0,
        MARGIN + 160.0,
        y + 13.0,
        &format!("{} {}", record.class, record.level),
    )?;
    text(&mut page, regular, 8.0, MARGIN + 270.0, y + 2.0, "BACKGROUND")?;
    text(&mut page, regular, 12.0, MARGIN + 270.0, y + 13.0, &record.background)?;
    text(&mut page, regular, 8.0, MARGIN + 380.0, y + 2.0, "PLAYER NAME")?;
    text(&mut page, regular, 12.0, MARGIN + 380.0, y + 13.0, "Generated")?;
    y += 40.0;

    // Second info row: race, alignment, experience points.
    rect(&mut page, MARGIN, y, CONTENT_WIDTH, 30.0)?;
    text(&mut page, regular, 8.0, MARGIN + 5.0, y + 2.0, "RACE")?;
    text(&mut page, regular, 12.0, MARGIN + 5.0, y + 13.0, &record.race)?;
    text(&mut page, regular, 8.0, MARGIN + 160.0, y + 2.0, "ALIGNMENT")?;
    text(
        &mut page,
        regular,
        12.0,
        MARGIN + 160.0,
        y + 13.0,
        &record.alignment.to_string(),
    )?;
    text(&mut page, regular, 8.0, MARGIN + 270.0, y + 2.0, "EXPERIENCE POINTS")?;
    text(
        &mut page,
        regular,
        12.0,
        MARGIN + 270.0,
        y + 13.0,
        &record.experience_points.to_string(),
    )?;
    y += 40.0;

    // Portrait box on the left, combat stat boxes on the right.
    let portrait_w = 150.0;
    let portrait_h = 180.0;
    let right_x = MARGIN + portrait_w + 20.0;

    rect(&mut page, MARGIN, y, portrait_w, portrait_h)?;
    text(&mut page, regular, 8.0, MARGIN + 5.0, y + 4.0, "CHARACTER PORTRAIT")?;
    match record.portrait.as_deref().and_then(decode_portrait) {
        Some(image) => {
            page.objects_mut().create_image_object(
                PdfPoints::new(MARGIN + 10.0),
                from_top(y + portrait_h - 5.0),
                &image,
                Some(PdfPoints::new(portrait_w - 20.0)),
                Some(PdfPoints::new(portrait_h - 25.0)),
            )?;
        }
        None => {
            text(
                &mut page,
                regular,
                10.0,
                MARGIN + 20.0,
                y + portrait_h / 2.0,
                "No portrait available",
            )?;
        }
    }

    let combat_w = (CONTENT_WIDTH - portrait_w - 30.0) / 3.0;
    let mut combat_y = y;
    for (index, (label, value)) in [
        ("ARMOR CLASS", record.armor_class.to_string()),
        ("INITIATIVE", format_modifier(record.initiative)),
        ("SPEED", format!("{} ft", record.speed)),
    ]
    .iter()
    .enumerate()
    {
        let x = right_x + index as f32 * combat_w;
        rect(&mut page, x, combat_y, combat_w - 5.0, 60.0)?;
        text(&mut page, regular, 8.0, x + 5.0, combat_y + 4.0, label)?;
        text(&mut page, bold, 24.0, x + 5.0, combat_y + 22.0, value)?;
    }
    combat_y += 70.0;

    let hp_w = (CONTENT_WIDTH - portrait_w - 30.0) / 2.0;
    rect(&mut page, right_x, combat_y, hp_w - 5.0, 60.0)?;
    text(&mut page, regular, 8.0, right_x + 5.0, combat_y + 4.0, "HIT POINT MAXIMUM")?;
    text(
        &mut page,
        bold,
        24.0,
        right_x + 5.0,
        combat_y + 22.0,
        &record.hit_points.to_string(),
    )?;
    rect(&mut page, right_x + hp_w, combat_y, hp_w - 5.0, 60.0)?;
    text(&mut page, regular, 8.0, right_x + hp_w + 5.0, combat_y + 4.0, "HIT DICE")?;
    text(
        &mut page,
        bold,
        18.0,
        right_x + hp_w + 5.0,
        combat_y + 22.0,
        &format!("{}d8", record.level),
    )?;
    combat_y += 70.0;

    rect(&mut page, right_x, combat_y, CONTENT_WIDTH - portrait_w - 30.0, 30.0)?;
    text(
        &mut page,
        regular,
        8.0,
        right_x + 5.0,
        combat_y + 4.0,
        "DEATH SAVES (SUCCESS/FAILURE)",
    )?;
    text(&mut page, regular, 12.0, right_x + 5.0, combat_y + 14.0, "O O O / O O O")?;

    // --- Page 2: ability scores, saving throws, skills, personality ---
    let mut page = document
        .pages_mut()
        .create_page_at_end(PdfPagePaperSize::a4())?;
    let mut y = MARGIN;
    text(&mut page, bold, 12.0, MARGIN, y, "ABILITY SCORES")?;
    y += 18.0;

    let box_size = 50.0;
    let abilities = &record.abilities;
    for (index, (label, score)) in [
        ("STR", abilities.strength),
        ("DEX", abilities.dexterity),
        ("CON", abilities.constitution),
        ("INT", abilities.intelligence),
        ("WIS", abilities.wisdom),
        ("CHA", abilities.charisma),
    ]
    .iter()
    .enumerate()
    {
        let x = MARGIN + index as f32 * (box_size + 10.0);
        rect(&mut page, x, y, box_size, box_size)?;
        text(&mut page, regular, 10.0, x + 16.0, y + 4.0, label)?;
        text(&mut page, bold, 16.0, x + 16.0, y + 22.0, &score.to_string())?;
        rect(&mut page, x, y + box_size + 5.0, box_size, 20.0)?;
        text(
            &mut page,
            regular,
            10.0,
            x + 18.0,
            y + box_size + 9.0,
            &format_modifier(ability_modifier(*score)),
        )?;
    }
    y += box_size + 45.0;

    let column2_x = PAGE_WIDTH / 2.0;
    let columns_top = y;
    text(&mut page, bold, 12.0, MARGIN, y, "SAVING THROWS")?;
    y += 16.0;
    for save in &record.saving_throws {
        text(&mut page, regular, 10.0, MARGIN + 10.0, y, &format!("- {save}"))?;
        y += 12.0;
    }
    let mut skills_y = columns_top;
    text(&mut page, bold, 12.0, column2_x, skills_y, "SKILLS")?;
    skills_y += 16.0;
    for skill in &record.skill_proficiencies {
        text(&mut page, regular, 10.0, column2_x + 10.0, skills_y, &format!("- {skill}"))?;
        skills_y += 12.0;
    }
    y = y.max(skills_y) + 20.0;

    for (heading, body) in [
        ("PERSONALITY TRAITS", record.personality.traits.as_str()),
        ("IDEALS", record.personality.ideal.as_str()),
        ("BONDS", record.personality.bond.as_str()),
        ("FLAWS", record.personality.flaw.as_str()),
    ] {
        text(&mut page, bold, 12.0, MARGIN, y, heading)?;
        y += 16.0;
        for line in body.lines() {
            for wrapped in textwrap::wrap(line, 100) {
                text(&mut page, regular, 10.0, MARGIN + 5.0, y, &wrapped)?;
                y += 12.0;
            }
        }
        y += 10.0;
    }

    // --- Page 3: attacks, spells, features, proficiencies ---
    let mut page = document
        .pages_mut()
        .create_page_at_end(PdfPagePaperSize::a4())?;
    let mut y = MARGIN;
    text(&mut page, bold, 12.0, MARGIN, y, "ATTACKS & SPELLCASTING")?;
    y += 18.0;

    let col1 = CONTENT_WIDTH * 0.4;
    let col2 = CONTENT_WIDTH * 0.2;
    text(&mut page, bold, 10.0, MARGIN, y, "NAME")?;
    text(&mut page, bold, 10.0, MARGIN + col1, y, "ATK BONUS")?;
    text(&mut page, bold, 10.0, MARGIN + col1 + col2, y, "DAMAGE/TYPE")?;
    y += 16.0;

    text(&mut page, regular, 10.0, MARGIN, y, "Unarmed Strike")?;
    text(&mut page, regular, 10.0, MARGIN + col1, y, "+2")?;
    text(&mut page, regular, 10.0, MARGIN + col1 + col2, y, "1d4 Bludgeoning")?;
    y += 15.0;
    if let Some(first_spell) = record.spells.first() {
        text(&mut page, regular, 10.0, MARGIN, y, "Spellcasting")?;
        text(&mut page, regular, 10.0, MARGIN + col1, y, "+3 (Int/Wis/Cha)")?;
        let summary = if record.spells.len() > 1 {
            format!("{first_spell}...")
        } else {
            first_spell.clone()
        };
        text(&mut page, regular, 10.0, MARGIN + col1 + col2, y, &summary)?;
        y += 15.0;
    }
    y += 10.0;

    text(&mut page, bold, 12.0, MARGIN, y, "SPELLS KNOWN")?;
    y += 16.0;
    if record.spells.is_empty() {
        text(&mut page, regular, 10.0, MARGIN + 5.0, y, "No spells known.")?;
        y += 15.0;
    } else {
        for spell in &record.spells {
            text(&mut page, regular, 10.0, MARGIN + 5.0, y, &format!("- {spell}"))?;
            y += 12.0;
        }
    }
    y += 10.0;

    text(&mut page, bold, 12.0, MARGIN, y, "FEATURES & TRAITS")?;
    y += 16.0;
    for wrapped in textwrap::wrap(&record.features, 100) {
        text(&mut page, regular, 10.0, MARGIN + 5.0, y, &wrapped)?;
        y += 12.0;
    }
    y += 10.0;

    text(&mut page, bold, 12.0, MARGIN, y, "OTHER PROFICIENCIES & LANGUAGES")?;
    y += 16.0;
    for wrapped in textwrap::wrap(&record.proficiencies_and_languages, 100) {
        text(&mut page, regular, 10.0, MARGIN + 5.0, y, &wrapped)?;
        y += 12.0;
    }

    // --- Page 4: backstory, with page breaks for long texts ---
    let mut page = document
        .pages_mut()
        .create_page_at_end(PdfPagePaperSize::a4())?;
    let mut y = MARGIN;
    text(&mut page, bold, 12.0, MARGIN, y, "CHARACTER BACKSTORY")?;
    y += 18.0;
    for paragraph in record.backstory.lines() {
        for wrapped in textwrap::wrap(paragraph, 100) {
            if y > PAGE_HEIGHT - MARGIN - 12.0 {
                page = document
                    .pages_mut()
                    .create_page_at_end(PdfPagePaperSize::a4())?;
                y = MARGIN;
            }
            text(&mut page, regular, 10.0, MARGIN + 5.0, y, &wrapped)?;
            y += 12.0;
        }
        y += 6.0;
    }

    Ok(document.save_to_bytes()?)
}
