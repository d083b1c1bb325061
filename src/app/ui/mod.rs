mod clustering;
mod panels;
mod relations;
mod search;
mod theory;
mod view_settings;
