use kutan_config::{Postgres, TextMatch};
use kutan_domain::{FilterSpec, PAGE_SIZE};
use kutan_storage::{
	Error,
	db::Db,
	models::{Faculty, NewSubject},
	queries,
};
use kutan_testkit::TestDatabase;

async fn seeded_db(dsn: String) -> (Db, Faculty, Faculty) {
	let cfg = Postgres { dsn, pool_max_conns: 2, acquire_timeout_ms: 5_000 };
	let db = Db::connect(&cfg).await.expect("Failed to connect to Postgres.");

	db.ensure_schema().await.expect("Failed to ensure schema.");

	let engineering =
		queries::insert_faculty(&db, "Engineering").await.expect("Failed to insert faculty.");
	let science = queries::insert_faculty(&db, "Science").await.expect("Failed to insert faculty.");

	for i in 0..25 {
		let faculty_id = if i % 2 == 0 { engineering.id } else { science.id };
		let name = if i % 5 == 0 { format!("Algorithms {i}") } else { format!("Subject {i}") };

		queries::insert_subject(
			&db,
			&NewSubject { name: &name, faculty_id, register_sum: 100, earn_sum: i },
		)
		.await
		.expect("Failed to insert subject.");
	}

	(db, engineering, science)
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set KUTAN_PG_DSN to run."]
async fn page_and_count_share_the_predicate() {
	let Some(base_dsn) = kutan_testkit::env_dsn() else {
		eprintln!("Skipping page_and_count_share_the_predicate; set KUTAN_PG_DSN to run this test.");

		return;
	};

	kutan_testkit::with_test_db(&base_dsn, |test_db: &TestDatabase| {
		let dsn = test_db.dsn().to_string();

		async move {
			let (db, engineering, _) = seeded_db(dsn).await;
			let spec = FilterSpec::build(Some("algo"), Some(&engineering.id.to_string()), None);
			let predicate = spec.predicate(TextMatch::Contains);
			let page = queries::find_subjects(&db, &predicate, 0, PAGE_SIZE as i64)
				.await
				.expect("Failed to find subjects.");
			let total = queries::count_subjects(&db, &predicate).await.expect("Failed to count.");

			// Algorithms 0, 10 and 20 belong to engineering.
			assert_eq!(total, 3);
			assert_eq!(page.len(), 3);
			assert!(page.iter().all(|subject| subject.faculty_id == engineering.id));
			assert!(page.iter().all(|subject| subject.name.starts_with("Algorithms")));

			Ok(())
		}
	})
	.await
	.expect("Test database run failed.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set KUTAN_PG_DSN to run."]
async fn pages_are_ordered_and_windowed() {
	let Some(base_dsn) = kutan_testkit::env_dsn() else {
		eprintln!("Skipping pages_are_ordered_and_windowed; set KUTAN_PG_DSN to run this test.");

		return;
	};

	kutan_testkit::with_test_db(&base_dsn, |test_db: &TestDatabase| {
		let dsn = test_db.dsn().to_string();

		async move {
			let (db, _, _) = seeded_db(dsn).await;
			let predicate = FilterSpec::default().predicate(TextMatch::Contains);
			let limit = PAGE_SIZE as i64;
			let total = queries::count_subjects(&db, &predicate).await.expect("Failed to count.");
			let last = queries::find_subjects(&db, &predicate, 20, limit).await.expect("Failed to page.");
			let beyond =
				queries::find_subjects(&db, &predicate, 30, limit).await.expect("Failed to page.");
			let first = queries::find_subjects(&db, &predicate, 0, limit).await.expect("Failed to page.");

			assert_eq!(total, 25);
			assert_eq!(last.len(), 5);
			assert!(beyond.is_empty());
			assert!(first.windows(2).all(|pair| pair[0].id < pair[1].id));
			assert!(first.last().map(|subject| subject.id) < last.first().map(|subject| subject.id));

			Ok(())
		}
	})
	.await
	.expect("Test database run failed.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set KUTAN_PG_DSN to run."]
async fn like_metacharacters_are_literal() {
	let Some(base_dsn) = kutan_testkit::env_dsn() else {
		eprintln!("Skipping like_metacharacters_are_literal; set KUTAN_PG_DSN to run this test.");

		return;
	};

	kutan_testkit::with_test_db(&base_dsn, |test_db: &TestDatabase| {
		let dsn = test_db.dsn().to_string();

		async move {
			let (db, _, _) = seeded_db(dsn).await;
			let wildcard = FilterSpec::build(Some("%"), None, None).predicate(TextMatch::Contains);
			let prefix = FilterSpec::build(Some("subject"), None, None).predicate(TextMatch::Prefix);

			assert_eq!(queries::count_subjects(&db, &wildcard).await.expect("Failed to count."), 0);
			assert_eq!(queries::count_subjects(&db, &prefix).await.expect("Failed to count."), 20);

			Ok(())
		}
	})
	.await
	.expect("Test database run failed.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set KUTAN_PG_DSN to run."]
async fn query_with_nul_returns_empty_page() {
	let Some(base_dsn) = kutan_testkit::env_dsn() else {
		eprintln!("Skipping query_with_nul_returns_empty_page; set KUTAN_PG_DSN to run this test.");

		return;
	};

	kutan_testkit::with_test_db(&base_dsn, |test_db: &TestDatabase| {
		let dsn = test_db.dsn().to_string();

		async move {
			let (db, _, _) = seeded_db(dsn).await;
			let predicate =
				FilterSpec::build(Some("sub\0ject"), None, None).predicate(TextMatch::Contains);
			let page = queries::find_subjects(&db, &predicate, 0, 10)
				.await
				.expect("Failed to find subjects.");
			let count =
				queries::count_subjects(&db, &predicate).await.expect("Failed to count.");

			assert!(page.is_empty());
			assert_eq!(count, 0);

			Ok(())
		}
	})
	.await
	.expect("Test database run failed.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set KUTAN_PG_DSN to run."]
async fn faculties_are_listed_in_id_order() {
	let Some(base_dsn) = kutan_testkit::env_dsn() else {
		eprintln!("Skipping faculties_are_listed_in_id_order; set KUTAN_PG_DSN to run this test.");

		return;
	};

	kutan_testkit::with_test_db(&base_dsn, |test_db: &TestDatabase| {
		let dsn = test_db.dsn().to_string();

		async move {
			let (db, engineering, science) = seeded_db(dsn).await;
			let faculties = queries::list_faculties(&db).await.expect("Failed to list faculties.");

			assert_eq!(faculties, vec![engineering, science]);

			Ok(())
		}
	})
	.await
	.expect("Test database run failed.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set KUTAN_PG_DSN to run."]
async fn insert_rejects_invalid_subjects() {
	let Some(base_dsn) = kutan_testkit::env_dsn() else {
		eprintln!("Skipping insert_rejects_invalid_subjects; set KUTAN_PG_DSN to run this test.");

		return;
	};

	kutan_testkit::with_test_db(&base_dsn, |test_db: &TestDatabase| {
		let dsn = test_db.dsn().to_string();

		async move {
			let (db, engineering, _) = seeded_db(dsn).await;
			let blank = queries::insert_subject(
				&db,
				&NewSubject { name: "  ", faculty_id: engineering.id, register_sum: 0, earn_sum: 0 },
			)
			.await;
			let negative = queries::insert_subject(
				&db,
				&NewSubject { name: "Chemistry", faculty_id: engineering.id, register_sum: -1, earn_sum: 0 },
			)
			.await;

			assert!(matches!(blank, Err(Error::InvalidArgument(_))));
			assert!(matches!(negative, Err(Error::InvalidArgument(_))));

			Ok(())
		}
	})
	.await
	.expect("Test database run failed.");
}
