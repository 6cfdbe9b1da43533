use super::mock::MockFs;
use super::*;
use tempfile::TempDir;

#[test]
fn test_mock_fs_file_operations() {
    let fs = MockFs::new();

    // ファイル追加
    fs.add_file("/lol/Config/a.json", "{}");
    assert!(fs.exists(Path::new("/lol/Config/a.json")));
    assert!(!fs.is_dir(Path::new("/lol/Config/a.json")));
    // 祖先ディレクトリも作成される
    assert!(fs.is_dir(Path::new("/lol/Config")));
    assert!(fs.is_dir(Path::new("/lol")));

    // 内容読み込み
    let content = fs.read_to_string(Path::new("/lol/Config/a.json")).unwrap();
    assert_eq!(content, "{}");

    // 削除
    fs.remove_file(Path::new("/lol/Config/a.json")).unwrap();
    assert!(!fs.exists(Path::new("/lol/Config/a.json")));
}

#[test]
fn test_mock_fs_read_dir_direct_children_only() {
    let fs = MockFs::new();
    fs.add_file("/root/a.json", "1");
    fs.add_file("/root/sub/b.json", "2");

    let mut names: Vec<_> = fs
        .read_dir(Path::new("/root"))
        .unwrap()
        .iter()
        .map(|e| e.file_name().to_string())
        .collect();
    names.sort();

    assert_eq!(names, vec!["a.json", "sub"]);
}

#[test]
fn test_mock_fs_read_dir_missing_is_err() {
    let fs = MockFs::new();
    assert!(fs.read_dir(Path::new("/missing")).is_err());
}

#[test]
fn test_mock_fs_remove_file_rejects_dir() {
    let fs = MockFs::new();
    fs.add_dir("/lol/Config");
    assert!(fs.remove_file(Path::new("/lol/Config")).is_err());
}

#[test]
fn test_real_fs_write_creates_parents() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("Champions").join("ahri").join("x.json");

    RealFs.write(&path, b"{}").unwrap();

    assert!(path.exists());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");
}

#[test]
fn test_real_fs_create_dir_all_is_idempotent() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("Recommended");

    RealFs.create_dir_all(&dir).unwrap();
    RealFs.create_dir_all(&dir).unwrap();

    assert!(RealFs.is_dir(&dir));
}

#[test]
fn test_real_fs_remove_missing_file_is_ok() {
    let temp = TempDir::new().unwrap();
    assert!(RealFs.remove_file(&temp.path().join("nope.json")).is_ok());
}

#[test]
fn test_real_fs_read_dir_kinds() {
    let temp = TempDir::new().unwrap();
    RealFs.write(&temp.path().join("a.json"), b"1").unwrap();
    RealFs.create_dir_all(&temp.path().join("sub")).unwrap();

    let entries = RealFs.read_dir(temp.path()).unwrap();
    assert_eq!(entries.len(), 2);
    assert!(entries.iter().any(|e| e.is_dir() && e.file_name() == "sub"));
    assert!(entries.iter().any(|e| !e.is_dir() && e.file_name() == "a.json"));
}
