use std::io::Read;
use std::path::Path;
use owo_colors::OwoColorize;
use quizdeck::config::{self, QuizdeckConfig, ResolvedSettings};
use quizdeck::output::{emit_success, is_quiet, OutputMode};
use quizdeck::ui::{self, theme, Icons};
use quizdeck::{QuizDraft, QuizStore, QuizType, StoragePort};

/// Read a file, or stdin when the path is `-`
fn read_input(path: &Path) -> anyhow::Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        return Ok(buf);
    }
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read {}: {}", path.display(), e))
}

fn read_draft(path: &Path) -> anyhow::Result<QuizDraft> {
    let text = read_input(path)?;
    let draft = QuizDraft::from_json(&text)?;
    draft.validate()?;
    Ok(draft)
}

pub fn run_init(path: &Path, settings: &ResolvedSettings, force: bool, output_mode: OutputMode) -> anyhow::Result<()> {
    let config = QuizdeckConfig {
        database: Some(settings.database.display().to_string()),
        storage_key: Some(settings.storage_key.clone()),
    };
    config::write_config(path, &config, force)?;

    if output_mode.is_human() {
        ui::success(&format!("Wrote {}", path.display()));
        ui::info("Database", &settings.database.display().to_string());
        ui::info("Storage key", &settings.storage_key);
    } else {
        emit_success(output_mode, "init", serde_json::json!({
            "config": path.display().to_string(),
            "database": settings.database.display().to_string(),
            "storageKey": settings.storage_key,
        }))?;
    }
    Ok(())
}

pub fn run_types(output_mode: OutputMode) -> anyhow::Result<()> {
    if output_mode.is_human() {
        ui::header(Icons::QUIZ, "Quiz types");
        for quiz_type in QuizType::all() {
            println!(
                "  {} {:<18} {} / {}",
                Icons::BULLET,
                quiz_type.label(),
                quiz_type.selector(false),
                quiz_type.selector(true).style(theme().timed.clone())
            );
        }
    } else {
        let data: Vec<_> = QuizType::all()
            .iter()
            .map(|t| serde_json::json!({
                "type": t.as_str(),
                "label": t.label(),
                "timedSelector": t.selector(true),
            }))
            .collect();
        emit_success(output_mode, "types", data)?;
    }
    Ok(())
}

pub fn run_list<S: StoragePort>(store: &QuizStore<S>, output_mode: OutputMode) -> anyhow::Result<()> {
    let quizzes = store.load_all();

    if !output_mode.is_human() {
        return emit_success(output_mode, "list", &quizzes);
    }

    if quizzes.is_empty() {
        ui::empty("No quizzes yet. Create one with `quizdeck create --file <draft.json>`.");
        return Ok(());
    }

    if !is_quiet() {
        ui::header(Icons::DATABASE, &format!("{} quizzes", quizzes.len()));
    }
    println!("{}", ui::quiz_table(&quizzes));
    Ok(())
}

pub fn run_show<S: StoragePort>(store: &QuizStore<S>, id: &str, output_mode: OutputMode) -> anyhow::Result<()> {
    let Some(quiz) = store.load_by_id(id) else {
        anyhow::bail!("no quiz with id {}", id);
    };

    if output_mode.is_human() {
        ui::quiz_details(&quiz);
    } else {
        emit_success(output_mode, "show", &quiz)?;
    }
    Ok(())
}

pub fn run_create<S: StoragePort>(store: &QuizStore<S>, file: &Path, output_mode: OutputMode) -> anyhow::Result<()> {
    let draft = read_draft(file)?;
    let id = store.create(&draft)?;

    if output_mode.is_human() {
        ui::success(&format!("Created \"{}\"", draft.title));
        ui::info("Id", id.as_str());
    } else {
        emit_success(output_mode, "create", serde_json::json!({ "id": id }))?;
    }
    Ok(())
}

pub fn run_edit<S: StoragePort>(store: &QuizStore<S>, id: &str, file: &Path, output_mode: OutputMode) -> anyhow::Result<()> {
    let draft = read_draft(file)?;
    if !store.update(id, &draft)? {
        anyhow::bail!("no quiz with id {}", id);
    }

    if output_mode.is_human() {
        ui::success(&format!("Updated \"{}\"", draft.title));
    } else {
        emit_success(output_mode, "edit", serde_json::json!({ "id": id }))?;
    }
    Ok(())
}

pub fn run_delete<S: StoragePort>(store: &QuizStore<S>, id: &str, output_mode: OutputMode) -> anyhow::Result<()> {
    if !store.delete(id)? {
        anyhow::bail!("no quiz with id {}", id);
    }

    if output_mode.is_human() {
        println!("{} Deleted {}", Icons::TRASH, id);
    } else {
        emit_success(output_mode, "delete", serde_json::json!({ "id": id }))?;
    }
    Ok(())
}

pub fn run_export<S: StoragePort>(
    store: &QuizStore<S>,
    id: Option<&str>,
    all: bool,
    output_mode: OutputMode,
) -> anyhow::Result<()> {
    let payload = match (id, all) {
        (_, true) => store.export_all()?,
        (Some(id), false) => match store.export_quiz(id)? {
            Some(payload) => payload,
            None => anyhow::bail!("no quiz with id {}", id),
        },
        (None, false) => anyhow::bail!("pass a quiz id or --all"),
    };

    if output_mode.is_human() {
        // Only the payload goes to stdout so it can be piped or redirected
        if !is_quiet() {
            eprintln!("{} {}", Icons::EXPORT, ui::dim("Copy the string below to import it elsewhere"));
        }
        println!("{}", payload);
    } else {
        emit_success(output_mode, "export", serde_json::json!({ "payload": payload }))?;
    }
    Ok(())
}

pub fn run_import<S: StoragePort>(
    store: &QuizStore<S>,
    text: Option<String>,
    file: Option<&Path>,
    output_mode: OutputMode,
) -> anyhow::Result<()> {
    let payload = match (text, file) {
        (Some(text), _) => text,
        (None, Some(path)) => read_input(path)?,
        (None, None) => read_input(Path::new("-"))?,
    };

    let summary = store.import_quizzes(&payload)?;

    if output_mode.is_human() {
        if summary.added == 0 {
            ui::warn("The payload contained no quizzes");
            return Ok(());
        }
        println!("{} Imported {} quizzes", Icons::IMPORT, summary.added.style(theme().success.clone()));
    } else {
        emit_success(output_mode, "import", summary)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use quizdeck::MemoryStorage;

    const DRAFT: &str = r#"{
        "title": "Capitals",
        "type": "single-choice-time",
        "initialTime": 30,
        "questions": [{"text": "Capital of France?", "answers": ["Paris", "Lyon"], "correctAnswers": [0]}]
    }"#;

    #[test]
    fn test_create_edit_delete_flow() {
        let dir = tempfile::tempdir().unwrap();
        let draft_path = dir.path().join("draft.json");
        std::fs::write(&draft_path, DRAFT).unwrap();

        let store = QuizStore::new(MemoryStorage::new());
        run_create(&store, &draft_path, OutputMode::Json).unwrap();

        let quiz = store.load_all().pop().unwrap();
        assert!(quiz.is_timed());
        assert_eq!(quiz.time_challenge.unwrap().initial_time, 30);

        std::fs::write(&draft_path, DRAFT.replace("Capitals", "Hauptstädte")).unwrap();
        run_edit(&store, quiz.id.as_str(), &draft_path, OutputMode::Json).unwrap();
        assert_eq!(store.load_by_id(quiz.id.as_str()).unwrap().title, "Hauptstädte");

        run_delete(&store, quiz.id.as_str(), OutputMode::Json).unwrap();
        assert!(store.load_all().is_empty());
        assert!(run_delete(&store, quiz.id.as_str(), OutputMode::Json).is_err());
    }

    #[test]
    fn test_invalid_draft_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let draft_path = dir.path().join("draft.json");
        std::fs::write(&draft_path, r#"{"title": "", "type": "single-choice"}"#).unwrap();

        let store = QuizStore::new(MemoryStorage::new());
        assert!(run_create(&store, &draft_path, OutputMode::Json).is_err());
        assert!(store.load_all().is_empty());
    }

    #[test]
    fn test_import_from_text() {
        let store = QuizStore::new(MemoryStorage::new());
        run_import(&store, Some(r#"[{"title": "A"}, {"title": "B"}]"#.into()), None, OutputMode::Json).unwrap();
        assert_eq!(store.load_all().len(), 2);
    }

    #[test]
    fn test_import_rejects_invalid_question() {
        let store = QuizStore::new(MemoryStorage::new());
        let payload = r#"[{"title": "A", "questions": [{"text": "Q", "answers": ["x", "y"], "correctAnswers": [5]}]}]"#;
        assert!(run_import(&store, Some(payload.into()), None, OutputMode::Json).is_err());
        assert!(store.load_all().is_empty());
    }

    #[test]
    fn test_import_empty_list_in_human_mode() {
        let store = QuizStore::new(MemoryStorage::new());
        run_import(&store, Some("[]".into()), None, OutputMode::Human).unwrap();
        assert!(store.load_all().is_empty());
    }

    #[test]
    fn test_export_requires_known_id() {
        let store = QuizStore::new(MemoryStorage::new());
        assert!(run_export(&store, Some("missing"), false, OutputMode::Json).is_err());
        assert!(run_export(&store, None, true, OutputMode::Json).is_ok());
    }
}
