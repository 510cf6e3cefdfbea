/// Movie table: header plus one row per movie, highlighted rows tinted
use iced::widget::{column, container, image, row, scrollable, text, Column};
use iced::{Alignment, Background, Color, Element, Length, Theme};
use std::path::Path;

use crate::catalog::{HighlightState, TableRow};
use crate::Message;

const POSTER_WIDTH: f32 = 40.0;
const POSTER_HEIGHT: f32 = 60.0;

/// Poster handle for a row's image, `None` when the file does not exist
pub fn poster(source: &str) -> Option<image::Handle> {
    let path = Path::new(source);
    path.is_file().then(|| image::Handle::from_path(path))
}

pub fn view<'a>(
    rows: &'a [TableRow],
    posters: &[Option<image::Handle>],
    highlight: &HighlightState,
    highlight_color: Color,
) -> Element<'a, Message> {
    let header = row![
        text("Poster").width(Length::Fixed(POSTER_WIDTH)),
        text("Title").width(Length::FillPortion(3)),
        text("Genre").width(Length::FillPortion(1)),
        text("Year").width(Length::FillPortion(1)),
    ]
    .spacing(16)
    .padding(8);

    if rows.is_empty() {
        return column![header, text("No movies in the catalog.")]
            .spacing(8)
            .into();
    }

    let body = Column::with_children(
        rows.iter()
            .enumerate()
            .map(|(position, movie)| {
                let poster = posters.get(position).cloned().flatten();
                table_row(movie, poster, highlight.is_highlighted(position), highlight_color)
            }),
    );

    column![header, scrollable(body).height(Length::Fill)]
        .spacing(4)
        .into()
}

fn table_row(
    movie: &TableRow,
    poster: Option<image::Handle>,
    highlighted: bool,
    highlight_color: Color,
) -> Element<'_, Message> {
    let poster: Element<'_, Message> = match poster {
        Some(handle) => image(handle)
            .width(Length::Fixed(POSTER_WIDTH))
            .height(Length::Fixed(POSTER_HEIGHT))
            .into(),
        None => container(text("?"))
            .center_x(Length::Fixed(POSTER_WIDTH))
            .center_y(Length::Fixed(POSTER_HEIGHT))
            .into(),
    };

    let cells = row![
        poster,
        text(&movie.title).width(Length::FillPortion(3)),
        text(&movie.genre).width(Length::FillPortion(1)),
        text(&movie.year).width(Length::FillPortion(1)),
    ]
    .spacing(16)
    .align_y(Alignment::Center);

    container(cells)
        .width(Length::Fill)
        .padding(8)
        .style(move |_theme: &Theme| {
            if highlighted {
                container::Style {
                    background: Some(Background::Color(highlight_color)),
                    ..container::Style::default()
                }
            } else {
                container::Style::default()
            }
        })
        .into()
}
