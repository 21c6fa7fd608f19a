use gdk_pixbuf::Pixbuf;
use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use std::path::Path;
use swatch::material::{Catalog, MaterialName};

pub const THUMBNAIL_SIZE: i32 = 55;
const SELECTED_CLASS: &str = "drape-material-selected";

pub struct MaterialRow {
    pub name: MaterialName,
    pub button: gtk::Button,
}

fn load_thumbnail(asset: &Path) -> Option<gtk::Image> {
    let pixbuf = (!asset.as_os_str().is_empty())
        .then(|| Pixbuf::from_file_at_scale(asset, THUMBNAIL_SIZE, THUMBNAIL_SIZE, true).ok())??;
    let texture = gdk::Texture::for_pixbuf(&pixbuf);
    let image = gtk::Image::from_paintable(Some(&texture));
    image.set_pixel_size(THUMBNAIL_SIZE);
    Some(image)
}

/// Replaces the contents of `container` with one button per catalog entry.
pub fn populate<F>(container: &gtk::Box, catalog: &Catalog, on_select: F) -> Vec<MaterialRow>
where
    F: Fn(MaterialName) + Clone + 'static,
{
    while let Some(child) = container.first_child() {
        container.remove(&child);
    }

    catalog
        .materials()
        .iter()
        .map(|material| {
            let content = gtk::Box::new(gtk::Orientation::Horizontal, 15);
            match load_thumbnail(&material.asset) {
                Some(image) => content.append(&image),
                None => log::debug!(
                    "No image for {} at {}",
                    material.name,
                    material.asset.display()
                ),
            }
            content.append(&gtk::Label::new(Some(material.name.as_str())));

            let button = gtk::Button::new();
            button.set_child(Some(&content));
            button.add_css_class("drape-material");

            let name = material.name.clone();
            let on_select = on_select.clone();
            button.connect_clicked(move |_| on_select(name.clone()));

            container.append(&button);
            MaterialRow {
                name: material.name.clone(),
                button,
            }
        })
        .collect()
}

pub fn mark_selected(rows: &[MaterialRow], selected: Option<&MaterialName>) {
    for row in rows {
        if selected == Some(&row.name) {
            row.button.add_css_class(SELECTED_CLASS);
        } else {
            row.button.remove_css_class(SELECTED_CLASS);
        }
    }
}
