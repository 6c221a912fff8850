use super::base::{Page, Position, Region, ICONS};
use crate::models::ShoppingListItem;
use html_escape::{encode_double_quoted_attribute, encode_text};

fn item_markup(item: &ShoppingListItem) -> String {
    format!(
        r#"<li class="shopping__item" data-itemid="{id}">
    <div class="shopping__count">
        <input type="number" value="{count}" step="{count}" class="shopping__count-value">
        <p>{unit}</p>
    </div>
    <p class="shopping__description">{ingredient}</p>
    <button class="shopping__delete btn-tiny">
        <svg><use href="{icons}#icon-circle-with-cross"></use></svg>
    </button>
</li>"#,
        id = encode_double_quoted_attribute(&item.id),
        count = item.count,
        unit = encode_text(&item.unit),
        ingredient = encode_text(&item.ingredient),
        icons = ICONS,
    )
}

pub fn render_item(page: &mut Page, item: &ShoppingListItem) {
    page.insert(
        Region::Shopping,
        Position::BeforeEnd,
        Some(item.id.clone()),
        item_markup(item),
    );
}

/// Redraw an item after its count changed
pub fn update_item(page: &mut Page, item: &ShoppingListItem) {
    page.replace(Region::Shopping, &item.id, item_markup(item));
}

pub fn delete_item(page: &mut Page, id: &str) {
    page.remove(Region::Shopping, id);
}
