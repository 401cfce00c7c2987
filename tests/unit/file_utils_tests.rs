/*!
 * Tests for file utility functions
 */

use anyhow::Result;
use multisumm::file_utils::{FileManager, SUMMARY_FILE_NAME};

use crate::common::{build_docx, create_temp_dir, create_test_file};

#[test]
fn test_readUpload_withTextFile_shouldReturnContents() -> Result<()> {
    let dir = create_temp_dir()?;
    let path = create_test_file(dir.path(), "input.txt", "नमस्ते दुनिया".as_bytes())?;
    assert_eq!(FileManager::read_upload(&path)?, "नमस्ते दुनिया");
    Ok(())
}

#[test]
fn test_readUpload_withDocx_shouldExtractParagraphs() -> Result<()> {
    let dir = create_temp_dir()?;
    let path = create_test_file(dir.path(), "input.docx", &build_docx(&["Uno", "Dos"])?)?;
    assert_eq!(FileManager::read_upload(&path)?, "Uno\n\nDos");
    Ok(())
}

#[test]
fn test_readUpload_withDirectory_shouldFail() -> Result<()> {
    let dir = create_temp_dir()?;
    assert!(FileManager::read_upload(dir.path()).is_err());
    Ok(())
}

#[test]
fn test_summaryOutputPath_withFileTarget_shouldKeepIt() -> Result<()> {
    let dir = create_temp_dir()?;
    let target = dir.path().join("mine.txt");
    assert_eq!(FileManager::summary_output_path(&target), target);
    assert_eq!(
        FileManager::summary_output_path(dir.path()),
        dir.path().join(SUMMARY_FILE_NAME)
    );
    Ok(())
}

#[test]
fn test_writeSummary_shouldOverwriteExistingFile() -> Result<()> {
    let dir = create_temp_dir()?;
    let target = create_test_file(dir.path(), "summary.txt", b"old")?;
    FileManager::write_summary(&target, "new **summary**")?;
    assert_eq!(std::fs::read_to_string(&target)?, "new **summary**");
    Ok(())
}

#[test]
fn test_ensureDir_shouldCreateNestedDirectories() -> Result<()> {
    let dir = create_temp_dir()?;
    let nested = dir.path().join("a/b/c");
    FileManager::ensure_dir(&nested)?;
    assert!(nested.is_dir());
    Ok(())
}
