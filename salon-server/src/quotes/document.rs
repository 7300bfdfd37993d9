//! Quote PDF rendering
//!
//! Builds the budget document as a declarative element tree and hands it
//! to genpdf for pagination. Layout mirrors the printed quote the hotel
//! sends out: header, client/event info, room line, services table,
//! totals block.

use chrono::{TimeZone, Utc};
use genpdf::{Alignment, Document, Element, SimplePageDecorator, elements, fonts, style};
use shared::models::{Client, Layout, Reservation, Room, ServiceLine};

use crate::quotes::totals::{QuoteTotals, line_subtotal};
use crate::utils::AppError;

/// Font family expected inside the configured font directory
/// (regular/bold/italic/bold-italic .ttf files).
const FONT_FAMILY: &str = "LiberationSans";

/// Everything needed to render one reservation's budget.
pub struct QuotePayload<'a> {
    pub reservation: &'a Reservation,
    pub room: &'a Room,
    pub layout: Option<&'a Layout>,
    pub client: &'a Client,
    pub lines: &'a [ServiceLine],
    pub totals: &'a QuoteTotals,
}

fn fmt_currency(value: f64) -> String {
    format!("$ {value:.2}")
}

fn fmt_date(millis: i64) -> String {
    match Utc.timestamp_millis_opt(millis).single() {
        Some(dt) => dt.format("%d/%m/%Y").to_string(),
        None => "-".to_string(),
    }
}

fn fmt_time(millis: i64) -> String {
    match Utc.timestamp_millis_opt(millis).single() {
        Some(dt) => dt.format("%H:%M").to_string(),
        None => "-".to_string(),
    }
}

fn render_err(e: impl std::fmt::Display) -> AppError {
    AppError::internal(format!("Failed to render quote document: {e}"))
}

/// Render the budget document into PDF bytes.
pub fn render_quote(font_dir: &str, payload: &QuotePayload<'_>) -> Result<Vec<u8>, AppError> {
    let font_family = fonts::from_files(font_dir, FONT_FAMILY, None)
        .map_err(|e| AppError::internal(format!("Failed to load quote fonts: {e}")))?;

    let mut doc = Document::new(font_family);
    doc.set_title("Presupuesto de Evento");
    doc.set_font_size(10);

    let mut decorator = SimplePageDecorator::new();
    decorator.set_margins(15);
    doc.set_page_decorator(decorator);

    let section_title = style::Style::new().bold().with_font_size(12);
    let header_style = style::Style::new().bold();

    // Header
    doc.push(
        elements::Paragraph::new("Presupuesto de Evento")
            .styled(style::Style::new().bold().with_font_size(20)),
    );
    doc.push(
        elements::Paragraph::new(format!("Reserva #{}", payload.reservation.id))
            .styled(style::Style::new().with_font_size(14)),
    );
    doc.push(elements::Break::new(1.0));

    // Client info block
    doc.push(elements::Paragraph::new("Información del cliente").styled(section_title));
    let mut info = elements::TableLayout::new(vec![1, 2]);
    info_row(&mut info, "Nombre:", &payload.client.name)?;
    info_row(
        &mut info,
        "Email:",
        payload.client.email.as_deref().unwrap_or("No informado"),
    )?;
    info_row(
        &mut info,
        "Tipo de evento:",
        payload
            .reservation
            .event_type
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or("Evento"),
    )?;
    doc.push(info);
    doc.push(elements::Break::new(0.5));

    // Event details block
    let max_capacity = match payload.layout {
        Some(layout) if layout.capacity > 0 => layout.capacity,
        _ => payload.room.capacity,
    };

    doc.push(elements::Paragraph::new("Detalles del evento").styled(section_title));
    let mut details = elements::TableLayout::new(vec![1, 2]);
    info_row(&mut details, "Fecha:", &fmt_date(payload.reservation.start_at))?;
    info_row(
        &mut details,
        "Horario:",
        &format!(
            "{} a {}",
            fmt_time(payload.reservation.start_at),
            fmt_time(payload.reservation.end_at)
        ),
    )?;
    info_row(&mut details, "Salón:", &payload.room.name)?;
    info_row(
        &mut details,
        "Distribución:",
        payload
            .layout
            .map(|l| l.name.as_str())
            .unwrap_or("Sin distribución definida"),
    )?;
    info_row(
        &mut details,
        "Cantidad de asistentes:",
        &payload.reservation.attendee_count.to_string(),
    )?;
    info_row(&mut details, "Capacidad máxima:", &max_capacity.to_string())?;
    doc.push(details);
    doc.push(elements::Break::new(1.0));

    // Room line
    doc.push(elements::Paragraph::new("Salón contratado").styled(section_title));
    let mut room_table = elements::TableLayout::new(vec![3, 1, 1, 1]);
    room_table.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));
    room_table
        .row()
        .element(cell("Descripción", header_style))
        .element(cell("Cantidad", header_style))
        .element(cell("Precio unitario", header_style))
        .element(cell("Subtotal", header_style))
        .push()
        .map_err(render_err)?;
    room_table
        .row()
        .element(cell(
            payload.room.description.as_deref().unwrap_or("Sin descripción"),
            style::Style::new(),
        ))
        .element(cell("1", style::Style::new()))
        .element(cell(&fmt_currency(payload.totals.room_subtotal), style::Style::new()))
        .element(cell(&fmt_currency(payload.totals.room_subtotal), style::Style::new()))
        .push()
        .map_err(render_err)?;
    doc.push(room_table);
    doc.push(elements::Break::new(1.0));

    // Services table
    doc.push(elements::Paragraph::new("Servicios adicionales").styled(section_title));
    let mut services = elements::TableLayout::new(vec![2, 2, 1, 1, 1]);
    services.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));
    services
        .row()
        .element(cell("Servicio", header_style))
        .element(cell("Descripción", header_style))
        .element(cell("Cantidad", header_style))
        .element(cell("Precio unitario", header_style))
        .element(cell("Subtotal", header_style))
        .push()
        .map_err(render_err)?;

    if payload.lines.is_empty() {
        services
            .row()
            .element(cell(
                "No se agregaron servicios adicionales para esta reserva.",
                style::Style::new(),
            ))
            .element(cell("", style::Style::new()))
            .element(cell("", style::Style::new()))
            .element(cell("", style::Style::new()))
            .element(cell("", style::Style::new()))
            .push()
            .map_err(render_err)?;
    } else {
        for line in payload.lines {
            services
                .row()
                .element(cell(&line.name, style::Style::new()))
                .element(cell(
                    line.description.as_deref().unwrap_or("Sin descripción"),
                    style::Style::new(),
                ))
                .element(cell(&line.quantity.to_string(), style::Style::new()))
                .element(cell(&fmt_currency(line.price), style::Style::new()))
                .element(cell(
                    &fmt_currency(line_subtotal(line.price, line.quantity)),
                    style::Style::new(),
                ))
                .push()
                .map_err(render_err)?;
        }
    }
    doc.push(services);
    doc.push(elements::Break::new(1.0));

    // Totals block
    total_line(&mut doc, "Total salón", payload.totals.room_subtotal, false);
    total_line(&mut doc, "Total servicios", payload.totals.services_subtotal, false);
    total_line(&mut doc, "Total general", payload.totals.grand_total, true);

    let mut buffer = Vec::new();
    doc.render(&mut buffer).map_err(render_err)?;
    Ok(buffer)
}

fn cell(
    text: &str,
    text_style: style::Style,
) -> elements::PaddedElement<elements::StyledElement<elements::Paragraph>> {
    elements::Paragraph::new(text.to_string())
        .styled(text_style)
        .padded(1)
}

fn info_row(
    table: &mut elements::TableLayout,
    label: &str,
    value: &str,
) -> Result<(), AppError> {
    table
        .row()
        .element(elements::Paragraph::new(label.to_string()).styled(style::Style::new().bold()))
        .element(elements::Paragraph::new(value.to_string()))
        .push()
        .map_err(render_err)
}

fn total_line(doc: &mut Document, label: &str, value: f64, emphasized: bool) {
    let text_style = if emphasized {
        style::Style::new().bold().with_font_size(12)
    } else {
        style::Style::new().bold()
    };
    doc.push(
        elements::Paragraph::new(format!("{label}: {}", fmt_currency(value)))
            .aligned(Alignment::Right)
            .styled(text_style),
    );
}
