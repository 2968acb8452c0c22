use gloo::file::ObjectUrl;
use leptos::web_sys::File;

/// A user-selected file paired with a browser-local URL that media elements can load
#[derive(Clone)]
pub struct FileWithUrl {
    pub file: File,
    pub url: ObjectUrl,
}

impl FileWithUrl {
    pub fn new(file: File) -> Self {
        let url = ObjectUrl::from(gloo::file::File::from(file.clone()));
        Self { file, url }
    }
}

impl PartialEq for FileWithUrl {
    fn eq(&self, other: &Self) -> bool {
        self.url.to_string() == other.url.to_string()
    }
}
