use consts::{THUMBNAIL_FOLDER, UPLOAD_FAILED_MESSAGE, VIDEO_FOLDER};
use leptos::prelude::*;
use uuid::Uuid;

use crate::storage::{StorageBackend, StorageError, StoragePath, UploadFile};

/// Everything needed to publish one video
#[derive(Clone, Debug)]
pub struct UploadRequest<F> {
    pub video: F,
    pub thumbnail: F,
    pub title: String,
    pub description: String,
    pub owner_id: String,
}

/// Where a finished upload landed
#[derive(Clone, Debug, PartialEq)]
pub struct UploadedVideo {
    pub video_path: StoragePath,
    pub thumbnail_path: StoragePath,
    pub title: String,
    pub description: String,
    pub owner_id: String,
}

/// Uploads a video and its thumbnail, tracking loading and error state for the UI
#[derive(Clone)]
pub struct VideoUploadHelper<S> {
    storage: S,
    loading: RwSignal<bool>,
    error: RwSignal<Option<String>>,
}

pub fn use_video_upload<S: StorageBackend>(storage: S) -> VideoUploadHelper<S> {
    VideoUploadHelper {
        storage,
        loading: RwSignal::new(false),
        error: RwSignal::new(None),
    }
}

impl<S: StorageBackend> VideoUploadHelper<S> {
    pub fn loading(&self) -> Signal<bool> {
        self.loading.into()
    }

    pub fn error(&self) -> Signal<Option<String>> {
        self.error.into()
    }

    /// Same loading and error state over another backend, e.g. one holding a refreshed token
    pub fn with_storage<T: StorageBackend>(&self, storage: T) -> VideoUploadHelper<T> {
        VideoUploadHelper {
            storage,
            loading: self.loading,
            error: self.error,
        }
    }

    pub async fn upload(&self, request: UploadRequest<S::File>) -> Option<UploadedVideo> {
        self.loading.set(true);
        self.error.set(None);

        let video_path = StoragePath::new(VIDEO_FOLDER, &Uuid::new_v4(), &request.video.file_name());
        let thumbnail_path = StoragePath::new(
            THUMBNAIL_FOLDER,
            &Uuid::new_v4(),
            &request.thumbnail.file_name(),
        );

        let res = self
            .store_files(&request, &video_path, &thumbnail_path)
            .await;

        let uploaded = match res {
            Ok(()) => {
                log::info!("uploaded {video_path} with thumbnail {thumbnail_path}");
                Some(UploadedVideo {
                    video_path,
                    thumbnail_path,
                    title: request.title,
                    description: request.description,
                    owner_id: request.owner_id,
                })
            }
            Err(e) => {
                log::error!("video upload failed: {e}");
                self.error.set(Some(UPLOAD_FAILED_MESSAGE.to_string()));
                None
            }
        };

        self.loading.set(false);
        uploaded
    }

    async fn store_files(
        &self,
        request: &UploadRequest<S::File>,
        video_path: &StoragePath,
        thumbnail_path: &StoragePath,
    ) -> Result<(), StorageError> {
        self.storage.put(video_path, &request.video).await?;

        if let Err(e) = self.storage.put(thumbnail_path, &request.thumbnail).await {
            // the video is already stored, remove it so no orphan is left behind
            if let Err(del_err) = self.storage.delete(video_path).await {
                log::warn!("failed to remove orphaned video {video_path}: {del_err}");
            }
            return Err(e);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use futures::executor::block_on;

    use super::*;

    #[derive(Clone, Debug)]
    struct MemFile(&'static str);

    impl UploadFile for MemFile {
        fn file_name(&self) -> String {
            self.0.to_string()
        }
    }

    #[derive(Clone, Debug, PartialEq)]
    enum Call {
        Put(String, &'static str),
        Delete(String),
    }

    #[derive(Clone, Default)]
    struct MemStorage {
        calls: Rc<RefCell<Vec<Call>>>,
        fail_folder: Option<&'static str>,
        loading_seen: Rc<RefCell<Vec<bool>>>,
        loading: Option<RwSignal<bool>>,
    }

    impl MemStorage {
        fn failing(folder: &'static str) -> Self {
            Self {
                fail_folder: Some(folder),
                ..Default::default()
            }
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.borrow().clone()
        }
    }

    impl StorageBackend for MemStorage {
        type File = MemFile;

        async fn put(&self, path: &StoragePath, file: &MemFile) -> Result<(), StorageError> {
            if let Some(loading) = self.loading {
                self.loading_seen.borrow_mut().push(loading.get_untracked());
            }
            self.calls
                .borrow_mut()
                .push(Call::Put(path.to_string(), file.0));
            if self.fail_folder == Some(path.folder()) {
                return Err(StorageError::Status {
                    status: 403,
                    message: "denied".into(),
                });
            }
            Ok(())
        }

        async fn delete(&self, path: &StoragePath) -> Result<(), StorageError> {
            self.calls.borrow_mut().push(Call::Delete(path.to_string()));
            Ok(())
        }
    }

    fn request() -> UploadRequest<MemFile> {
        UploadRequest {
            video: MemFile("trip.mp4"),
            thumbnail: MemFile("thumb.jpg"),
            title: "A".into(),
            description: "B".into(),
            owner_id: "u1".into(),
        }
    }

    fn put_paths(calls: &[Call]) -> Vec<String> {
        calls
            .iter()
            .filter_map(|c| match c {
                Call::Put(path, _) => Some(path.clone()),
                Call::Delete(_) => None,
            })
            .collect()
    }

    #[test]
    fn successful_upload_writes_both_files() {
        let owner = Owner::new();
        owner.set();

        let mut storage = MemStorage::default();
        let helper = use_video_upload(storage.clone());
        storage.loading = Some(helper.loading);
        let helper = VideoUploadHelper {
            storage: storage.clone(),
            ..helper
        };

        let uploaded = block_on(helper.upload(request())).expect("upload should succeed");

        assert!(!helper.loading().get_untracked());
        assert_eq!(helper.error().get_untracked(), None);
        // loading was raised while the storage calls ran
        assert_eq!(*storage.loading_seen.borrow(), vec![true, true]);

        let paths = put_paths(&storage.calls());
        assert_eq!(paths.len(), 2);
        assert_eq!(paths[0], uploaded.video_path.to_string());
        assert_eq!(paths[1], uploaded.thumbnail_path.to_string());
        assert!(paths[0].starts_with("videos/") && paths[0].ends_with(".mp4"));
        assert!(paths[1].starts_with("thumbnails/") && paths[1].ends_with(".jpg"));
        assert_eq!(uploaded.owner_id, "u1");
        assert_eq!(uploaded.title, "A");
        assert_eq!(uploaded.description, "B");
    }

    #[test]
    fn each_upload_uses_fresh_identifiers() {
        let owner = Owner::new();
        owner.set();

        let storage = MemStorage::default();
        let helper = use_video_upload(storage.clone());
        block_on(helper.upload(request()));
        block_on(helper.upload(request()));

        let paths = put_paths(&storage.calls());
        assert_eq!(paths.len(), 4);
        let ids: std::collections::HashSet<_> = paths
            .iter()
            .map(|p| p.split('/').nth(1).unwrap().split('.').next().unwrap().to_string())
            .collect();
        assert_eq!(ids.len(), 4);
        for id in ids {
            assert!(Uuid::parse_str(&id).is_ok());
        }
    }

    #[test]
    fn failed_video_write_skips_thumbnail() {
        let owner = Owner::new();
        owner.set();

        let storage = MemStorage::failing(VIDEO_FOLDER);
        let helper = use_video_upload(storage.clone());

        let uploaded = block_on(helper.upload(request()));

        assert_eq!(uploaded, None);
        assert!(!helper.loading().get_untracked());
        assert_eq!(
            helper.error().get_untracked().as_deref(),
            Some(UPLOAD_FAILED_MESSAGE)
        );
        let calls = storage.calls();
        assert_eq!(calls.len(), 1);
        assert!(matches!(&calls[0], Call::Put(path, "trip.mp4") if path.starts_with("videos/")));
    }

    #[test]
    fn failed_thumbnail_write_removes_stored_video() {
        let owner = Owner::new();
        owner.set();

        let storage = MemStorage::failing(THUMBNAIL_FOLDER);
        let helper = use_video_upload(storage.clone());

        assert_eq!(block_on(helper.upload(request())), None);
        assert_eq!(
            helper.error().get_untracked().as_deref(),
            Some(UPLOAD_FAILED_MESSAGE)
        );

        let calls = storage.calls();
        assert_eq!(calls.len(), 3);
        let Call::Put(video_path, _) = &calls[0] else {
            panic!("expected video write first, got {calls:?}");
        };
        assert_eq!(calls[2], Call::Delete(video_path.clone()));
    }

    #[test]
    fn next_attempt_clears_previous_error() {
        let owner = Owner::new();
        owner.set();

        let failing = use_video_upload(MemStorage::failing(VIDEO_FOLDER));
        block_on(failing.upload(request()));
        assert!(failing.error().get_untracked().is_some());

        let helper = failing.with_storage(MemStorage::default());
        assert!(block_on(helper.upload(request())).is_some());
        assert_eq!(failing.error().get_untracked(), None);
        assert_eq!(helper.error().get_untracked(), None);
    }
}
