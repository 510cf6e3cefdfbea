/// Facet boxes: the year radios and the genre checkboxes
use iced::widget::{button, checkbox, column, radio, text, Column};
use iced::Element;

use crate::catalog::{CatalogAction, FacetView};
use crate::state::data::{ControlKind, Field};
use crate::Message;

/// A rendered facet plus which of its controls are selected
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetBox {
    pub facet: FacetView,
    checked: Vec<bool>,
}

impl FacetBox {
    /// Nothing selected
    pub fn new(facet: FacetView) -> Self {
        let checked = vec![false; facet.len()];
        Self { facet, checked }
    }

    pub fn field(&self) -> Field {
        self.facet.field
    }

    /// Select or deselect a control. Selecting a radio deselects the others.
    pub fn toggle(&mut self, index: usize, is_checked: bool) {
        if index >= self.checked.len() {
            return;
        }
        if self.facet.kind == ControlKind::Radio && is_checked {
            self.checked.iter_mut().for_each(|c| *c = false);
        }
        self.checked[index] = is_checked;
    }

    pub fn is_checked(&self, index: usize) -> bool {
        self.checked.get(index).copied().unwrap_or(false)
    }

    /// Selected values in facet order
    pub fn selected_values(&self) -> Vec<String> {
        self.facet
            .values()
            .zip(&self.checked)
            .filter(|(_, checked)| **checked)
            .map(|(value, _)| value.to_string())
            .collect()
    }

    /// The filter this box submits
    pub fn action(&self) -> CatalogAction {
        let selected = self.selected_values();
        match self.field() {
            Field::Year => CatalogAction::FilterYear(selected.into_iter().next()),
            Field::Genre => CatalogAction::FilterGenres(selected),
        }
    }
}

/// Heading, one control per value, and the submit button
pub fn view<'a>(facet_box: &'a FacetBox) -> Element<'a, Message> {
    let field = facet_box.field();
    let selected_radio = (0..facet_box.facet.len()).find(|&i| facet_box.is_checked(i));

    let controls = Column::with_children(facet_box.facet.controls.iter().enumerate().map(
        |(index, control)| -> Element<'a, Message> {
            let label = control.label.display();
            match facet_box.facet.kind {
                ControlKind::Radio => radio(label, index, selected_radio, move |i| {
                    Message::FacetToggled(field, i, true)
                })
                .into(),
                ControlKind::Checkbox => checkbox(label, facet_box.is_checked(index))
                    .on_toggle(move |is_checked| Message::FacetToggled(field, index, is_checked))
                    .into(),
            }
        },
    ))
    .spacing(6);

    let heading = match field {
        Field::Year => "Year",
        Field::Genre => "Genre",
    };

    let controls: Element<'a, Message> = if facet_box.facet.is_empty() {
        text(format!("No {} values", field)).into()
    } else {
        controls.into()
    };

    column![
        text(heading).size(20),
        controls,
        button(text(format!("Filter by {}", field)))
            .on_press(Message::FacetSubmitted(field))
            .padding(8),
    ]
    .spacing(10)
    .into()
}
