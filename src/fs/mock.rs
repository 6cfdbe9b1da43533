//! テスト用モックファイルシステム

use super::*;
use std::collections::BTreeMap;
use std::sync::RwLock;

/// テスト用モックファイルシステム
///
/// パスは `/` 区切りの文字列として保持する。
pub struct MockFs {
    files: RwLock<BTreeMap<String, MockFile>>,
}

struct MockFile {
    content: Vec<u8>,
    file_type: FsFileType,
}

impl MockFs {
    pub fn new() -> Self {
        Self {
            files: RwLock::new(BTreeMap::new()),
        }
    }

    /// ファイルを追加（祖先ディレクトリも作成）
    pub fn add_file(&self, path: &str, content: &str) {
        if let Some(parent) = Path::new(path).parent() {
            self.add_dir(&parent.to_string_lossy());
        }
        self.files.write().unwrap().insert(
            path.to_string(),
            MockFile {
                content: content.as_bytes().to_vec(),
                file_type: FsFileType::File,
            },
        );
    }

    /// ディレクトリを追加（祖先ディレクトリも作成）
    pub fn add_dir(&self, path: &str) {
        let mut files = self.files.write().unwrap();
        for ancestor in Path::new(path).ancestors() {
            let key = ancestor.to_string_lossy().to_string();
            if key.is_empty() || key == "/" {
                continue;
            }
            files.entry(key).or_insert(MockFile {
                content: Vec::new(),
                file_type: FsFileType::Dir,
            });
        }
    }

    /// パスが存在するか
    pub fn exists(&self, path: &Path) -> bool {
        self.files
            .read()
            .unwrap()
            .contains_key(path.to_string_lossy().as_ref())
    }

    /// ファイル内容を読み込み
    pub fn read_to_string(&self, path: &Path) -> Result<String> {
        self.files
            .read()
            .unwrap()
            .get(path.to_string_lossy().as_ref())
            .filter(|f| f.file_type == FsFileType::File)
            .map(|f| String::from_utf8_lossy(&f.content).to_string())
            .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::NotFound, "not found").into())
    }

    /// 指定ディレクトリ直下のファイル名一覧（ソート済み）
    pub fn file_names_in(&self, dir: &str) -> Vec<String> {
        self.read_dir(Path::new(dir))
            .unwrap_or_default()
            .into_iter()
            .filter(|e| !e.is_dir())
            .map(|e| e.file_name().to_string())
            .collect()
    }
}

impl Default for MockFs {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for MockFs {
    fn remove_file(&self, path: &Path) -> Result<()> {
        let path_str = path.to_string_lossy().to_string();
        let mut files = self.files.write().unwrap();

        if let Some(file) = files.get(&path_str) {
            if file.file_type == FsFileType::Dir {
                return Err(LbError::Io(std::io::Error::new(
                    std::io::ErrorKind::IsADirectory,
                    "Cannot remove directory with remove_file",
                )));
            }
        }

        files.remove(&path_str);
        Ok(())
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.files
            .read()
            .unwrap()
            .get(path.to_string_lossy().as_ref())
            .map(|f| f.file_type == FsFileType::Dir)
            .unwrap_or(false)
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        self.add_dir(&path.to_string_lossy());
        Ok(())
    }

    fn write(&self, path: &Path, content: &[u8]) -> Result<()> {
        if let Some(parent) = path.parent() {
            self.add_dir(&parent.to_string_lossy());
        }
        self.files.write().unwrap().insert(
            path.to_string_lossy().to_string(),
            MockFile {
                content: content.to_vec(),
                file_type: FsFileType::File,
            },
        );
        Ok(())
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<FsDirEntry>> {
        let path_str = path.to_string_lossy().to_string();
        let files = self.files.read().unwrap();

        match files.get(&path_str) {
            Some(file) if file.file_type != FsFileType::Dir => {
                return Err(LbError::Io(std::io::Error::new(
                    std::io::ErrorKind::NotADirectory,
                    "Not a directory",
                )));
            }
            None => {
                return Err(LbError::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "not found",
                )));
            }
            Some(_) => {}
        }

        let prefix = if path_str.ends_with('/') {
            path_str.clone()
        } else {
            format!("{}/", path_str)
        };

        let entries: Vec<_> = files
            .iter()
            .filter(|(k, _)| {
                if !k.starts_with(&prefix) {
                    return false;
                }
                // 直接の子のみ（サブディレクトリの中身は除外）
                let remainder = &k[prefix.len()..];
                !remainder.contains('/')
            })
            .map(|(k, v)| FsDirEntry {
                path: PathBuf::from(k),
                file_type: v.file_type,
            })
            .collect();

        Ok(entries)
    }
}
