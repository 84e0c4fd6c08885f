use fleet_manager::core::database::{self, DATABASE_FILE};
use fleet_manager::{Fleet, MemoryStorage, Session, Terminal};

const IMPORT: &str = "SAILING,Dreamer,2010,Catalina 30,30,45000.00\n\
POWER,Speedy,2018,Boston Whaler,17,78000.00\n";

const MENU: &str = "\n(P)rint, (A)dd, (R)emove, (E)xpense, e(X)it : \n";

const S1_REPORT: &str = "Fleet report:\n\
SAILING  Dreamer              2010 Catalina 30   30' : Paid $ 45000.00 : Spent $     0.00\n\
POWER    Speedy               2018 Boston Whaler  17' : Paid $ 78000.00 : Spent $     0.00\n\
Total : Paid $ 123000.00 : Spent $ 0.00\n";

struct Transcript {
    out: String,
    err: String,
    fleet: Fleet,
}

fn run_session(storage: &MemoryStorage, import: Option<&str>, input: &str) -> Transcript {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let fleet = {
        let terminal = Terminal::new(input.as_bytes(), &mut out, &mut err);
        let mut session = Session::new(storage, terminal);
        session.start(import).unwrap();
        session.fleet().clone()
    };
    Transcript {
        out: String::from_utf8(out).unwrap(),
        err: String::from_utf8(err).unwrap(),
        fleet,
    }
}

fn imported_storage() -> MemoryStorage {
    MemoryStorage::new().with_file("fleet.csv", IMPORT)
}

/// The last printed report, from its heading through the totals line.
fn last_report(out: &str) -> &str {
    let start = out.rfind("Fleet report:\n").unwrap();
    let rest = &out[start..];
    let totals = rest.find("Total : ").unwrap();
    let end = totals + rest[totals..].find('\n').unwrap() + 1;
    &rest[..end]
}

#[test]
fn test_s1_import_and_report() {
    let storage = imported_storage();
    let transcript = run_session(&storage, Some("fleet.csv"), "P\nX\n");

    let expected = format!(
        "Fleet data loaded from CSV file.\n{menu}{report}\n{menu}\
Fleet data saved to database.\nExiting the Fleet Management System\n",
        menu = MENU,
        report = S1_REPORT
    );
    assert_eq!(transcript.out, expected);
    assert!(transcript.err.is_empty());
    assert_eq!(transcript.fleet.len(), 2);
}

#[test]
fn test_s2_authorized_expense() {
    let storage = imported_storage();
    let transcript = run_session(&storage, Some("fleet.csv"), "E\nDreamer\n1000\nP\nX\n");

    assert!(transcript.out.contains(
        "Which boat do you want to spend on? : How much do you want to spend?      : \
Expense authorized, $1000.00.\n"
    ));
    let report = last_report(&transcript.out);
    assert!(report.contains(
        "SAILING  Dreamer              2010 Catalina 30   30' : Paid $ 45000.00 : Spent $  1000.00\n"
    ));
    assert!(report.ends_with("Total : Paid $ 123000.00 : Spent $ 1000.00\n"));
}

#[test]
fn test_s3_refused_expense() {
    let storage = imported_storage();
    let transcript = run_session(&storage, Some("fleet.csv"), "E\nSpeedy\n999999\nP\nX\n");

    assert!(transcript
        .out
        .contains("Expense not permitted, only $78000.00 left to spend.\n"));
    assert_eq!(last_report(&transcript.out), S1_REPORT);
    assert_eq!(transcript.fleet.total_expenses(), 0.0);
}

#[test]
fn test_s4_add_then_remove_case_insensitively() {
    let storage = imported_storage();
    let transcript = run_session(
        &storage,
        Some("fleet.csv"),
        "A\nPOWER,Tender,2020,Zodiac,10,5000\nP\nR\ntender\nP\nX\n",
    );

    assert!(transcript
        .out
        .contains("Please enter the new boat CSV data: Boat added successfully.\n"));
    assert!(transcript
        .out
        .contains("POWER    Tender               2020 Zodiac        10' : Paid $  5000.00 : Spent $     0.00\n"));
    assert!(transcript
        .out
        .contains("Which boat do you want to remove? : Boat removed successfully.\n"));
    assert_eq!(last_report(&transcript.out), S1_REPORT);
}

#[test]
fn test_s5_malformed_add() {
    let storage = imported_storage();
    let transcript = run_session(
        &storage,
        Some("fleet.csv"),
        "A\nPOWER,Broken,notayear,Zodiac,10,5000\nP\nX\n",
    );

    assert!(transcript.out.contains("Failed to add boat. Check your input.\n"));
    assert_eq!(last_report(&transcript.out), S1_REPORT);
    assert_eq!(transcript.fleet.len(), 2);
}

#[test]
fn test_s6_resume_from_database() {
    let storage = imported_storage();
    let first = run_session(&storage, Some("fleet.csv"), "E\nDreamer\n1000\nP\nX\n");
    assert!(first.out.contains("Fleet data saved to database.\n"));
    assert!(storage.contents(DATABASE_FILE).is_some());

    let second = run_session(&storage, None, "P\nX\n");
    assert!(second.out.starts_with("Fleet data loaded from database.\n"));
    assert_eq!(last_report(&second.out), last_report(&first.out));
    assert_eq!(second.fleet, first.fleet);
}

#[test]
fn test_missing_import_file_starts_empty() {
    let storage = MemoryStorage::new();
    let transcript = run_session(&storage, Some("nowhere.csv"), "P\nX\n");

    assert_eq!(
        transcript.err,
        "ERROR: Failed to load fleet data from CSV file.\n"
    );
    assert!(!transcript.out.contains("Fleet data loaded from CSV file."));
    assert!(transcript
        .out
        .contains("Fleet report:\nTotal : Paid $ 0.00 : Spent $ 0.00\n"));
    assert!(transcript.fleet.is_empty());
}

#[test]
fn test_blank_import_path_reports_and_continues() {
    let storage = imported_storage();
    let transcript = run_session(&storage, Some(""), "P\nX\n");

    assert_eq!(
        transcript.err,
        "ERROR: Failed to load fleet data from CSV file.\n"
    );
    assert!(transcript
        .out
        .contains("Fleet report:\nTotal : Paid $ 0.00 : Spent $ 0.00\n"));
    assert!(transcript
        .out
        .ends_with("Fleet data saved to database.\nExiting the Fleet Management System\n"));
    assert!(transcript.fleet.is_empty());
}

#[test]
fn test_no_database_starts_fresh() {
    let storage = MemoryStorage::new();
    let transcript = run_session(&storage, None, "X\n");

    assert!(transcript
        .out
        .starts_with("No existing fleet data found. Starting fresh.\n"));
    assert!(transcript.err.is_empty());
}

#[test]
fn test_corrupt_database_starts_fresh() {
    let storage = MemoryStorage::new().with_file(DATABASE_FILE, &b"\xac\xed\x00\x05garbage"[..]);
    let transcript = run_session(&storage, None, "X\n");

    assert!(transcript
        .out
        .starts_with("No existing fleet data found. Starting fresh.\n"));
    assert!(transcript.fleet.is_empty());
    let saved = storage.contents(DATABASE_FILE).unwrap();
    assert!(database::decode(&saved).unwrap().is_empty());
}

#[test]
fn test_save_failure_is_reported_and_survived() {
    let storage = MemoryStorage::read_only().with_file("fleet.csv", IMPORT);
    let transcript = run_session(&storage, Some("fleet.csv"), "X\n");

    assert_eq!(transcript.err, "ERROR: Failed to save fleet data.\n");
    assert!(!transcript.out.contains("Fleet data saved to database."));
    assert!(transcript
        .out
        .ends_with("Exiting the Fleet Management System\n"));
}

#[test]
fn test_menu_options_are_case_insensitive_and_use_first_char() {
    let storage = imported_storage();
    let transcript = run_session(&storage, Some("fleet.csv"), "print\nx\n");

    assert_eq!(last_report(&transcript.out), S1_REPORT);
    assert!(transcript
        .out
        .ends_with("Exiting the Fleet Management System\n"));
}

#[test]
fn test_invalid_and_empty_menu_input() {
    let storage = imported_storage();
    let transcript = run_session(&storage, Some("fleet.csv"), "Q\n\nX\n");

    assert_eq!(
        transcript.out.matches("Invalid menu option, try again.\n").count(),
        2
    );
}

#[test]
fn test_unknown_boat_messages() {
    let storage = imported_storage();
    let transcript = run_session(&storage, Some("fleet.csv"), "R\nGhost\nE\nGhost\nX\n");

    assert!(transcript
        .out
        .contains("Which boat do you want to remove? : Cannot find boat Ghost\n"));
    assert!(transcript
        .out
        .contains("Which boat do you want to spend on? : Cannot find boat Ghost.\n"));
    assert!(!transcript.out.contains("How much do you want to spend?"));
}

#[test]
fn test_expense_amount_rest_of_line_is_discarded() {
    let storage = imported_storage();
    let transcript = run_session(
        &storage,
        Some("fleet.csv"),
        "E\nspeedy\n250.5 for paint\nE\nSPEEDY\n0.25\nX\n",
    );

    assert!(transcript.out.contains("Expense authorized, $250.50.\n"));
    assert!(transcript.out.contains("Expense authorized, $250.75.\n"));
    let speedy = transcript.fleet.find_boat_by_name("Speedy").unwrap();
    assert_eq!(speedy.expenses(), 250.75);
}

#[test]
fn test_expense_messages_round_ties_up() {
    let storage = MemoryStorage::new().with_file("fleet.csv", "POWER,Dinghy,2020,Zodiac,8,10.25\n");
    let transcript = run_session(
        &storage,
        Some("fleet.csv"),
        "E\nDinghy\n0.125\nE\nDinghy\n20\nX\n",
    );

    assert!(transcript.out.contains("Expense authorized, $0.13.\n"));
    assert!(transcript
        .out
        .contains("Expense not permitted, only $10.13 left to spend.\n"));
}

#[test]
fn test_invalid_expense_amount() {
    let storage = imported_storage();
    let transcript = run_session(
        &storage,
        Some("fleet.csv"),
        "E\nDreamer\nlots\nE\nDreamer\n-20\nX\n",
    );

    assert_eq!(transcript.out.matches("Invalid expense amount.\n").count(), 2);
    assert_eq!(transcript.fleet.total_expenses(), 0.0);
}

#[test]
fn test_spending_the_exact_allowance() {
    let storage = imported_storage();
    let transcript = run_session(
        &storage,
        Some("fleet.csv"),
        "E\nDreamer\n45000\nE\nDreamer\n0.01\nX\n",
    );

    assert!(transcript.out.contains("Expense authorized, $45000.00.\n"));
    assert!(transcript
        .out
        .contains("Expense not permitted, only $0.00 left to spend.\n"));
}

#[test]
fn test_end_of_input_exits_and_saves() {
    let storage = imported_storage();
    let transcript = run_session(&storage, Some("fleet.csv"), "A\nPOWER,Tender,2020,Zodiac,10,5000\n");

    assert!(transcript.out.ends_with(
        "Fleet data saved to database.\nExiting the Fleet Management System\n"
    ));
    let saved = database::decode(&storage.contents(DATABASE_FILE).unwrap()).unwrap();
    assert_eq!(saved.len(), 3);
}

#[test]
fn test_end_of_input_mid_prompt() {
    let storage = imported_storage();
    let transcript = run_session(&storage, Some("fleet.csv"), "E\nDreamer\n");

    assert!(transcript
        .out
        .ends_with("Exiting the Fleet Management System\n"));
    assert_eq!(transcript.fleet.total_expenses(), 0.0);
}
