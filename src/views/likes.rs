use super::base::{Page, Position, Region};
use super::recipe::{like_icon, RECIPE_KEY};
use super::search::{limit_title, TITLE_LIMIT};
use crate::models::Like;
use html_escape::{encode_double_quoted_attribute, encode_text};

/// Switch the heart on the recipe panel between filled and outlined
pub fn toggle_like_btn(page: &mut Page, is_liked: bool) {
    let from = format!("#{}\"", like_icon(!is_liked));
    let to = format!("#{}\"", like_icon(is_liked));
    for fragment in page.fragments_mut(Region::Recipe) {
        if fragment.key.as_deref() == Some(RECIPE_KEY) {
            fragment.html = fragment.html.replace(&from, &to);
        }
    }
    page.set_like_button_active(is_liked);
}

/// The likes menu is only shown when there is something in it
pub fn toggle_like_menu(page: &mut Page, num_likes: usize) {
    page.set_likes_menu_visible(num_likes > 0);
}

pub fn render_like(page: &mut Page, like: &Like) {
    let markup = format!(
        r##"<li>
    <a class="likes__link" href="#{id}">
        <figure class="likes__fig">
            <img src="{img}" alt="{alt}">
        </figure>
        <div class="likes__data">
            <h4 class="likes__name">{title}</h4>
            <p class="likes__author">{author}</p>
        </div>
    </a>
</li>"##,
        id = encode_double_quoted_attribute(&like.id),
        img = encode_double_quoted_attribute(&like.img),
        alt = encode_double_quoted_attribute(&like.title),
        title = encode_text(&limit_title(&like.title, TITLE_LIMIT)),
        author = encode_text(&like.author),
    );
    page.insert(
        Region::LikesList,
        Position::BeforeEnd,
        Some(like.id.clone()),
        markup,
    );
}

pub fn delete_like(page: &mut Page, id: &str) {
    page.remove(Region::LikesList, id);
}
