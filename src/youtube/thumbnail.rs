use crate::youtube::VideoId;
use serde::Serialize;

const THUMBNAIL_URL_BASE: &str = "https://i.ytimg.com/vi/";

/// (file name, width, height), largest first.
const THUMBNAIL_VARIANTS: [(&str, u32, u32); 3] = [
    ("sddefault", 640, 480),
    ("hqdefault", 480, 360),
    ("mqdefault", 320, 180),
];

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Thumbnail {
    pub src: String,
    pub sizes: String,
    pub media_type: &'static str,
}

pub fn thumbnails(video_id: &VideoId) -> Vec<Thumbnail> {
    THUMBNAIL_VARIANTS
        .iter()
        .map(|(file_name, width, height)| Thumbnail {
            src: format!("{}{}/{}.jpg", THUMBNAIL_URL_BASE, video_id, file_name),
            sizes: format!("{}x{}", width, height),
            media_type: "image/jpeg",
        })
        .collect()
}
