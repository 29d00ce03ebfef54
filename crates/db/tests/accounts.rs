mod common;

use kobonat_db::models::profile::UpdateProfile;
use kobonat_db::models::settings::UpdateSettings;
use kobonat_db::repositories::setup_repo::CompleteSetup;
use kobonat_db::repositories::{ProfileRepo, SettingsRepo, SetupRepo, UserRepo};
use sqlx::PgPool;

fn wizard(username: &str) -> CompleteSetup {
    CompleteSetup {
        username: username.into(),
        email: format!("{username}@example.com"),
        password_hash: "hash".into(),
        app_name: "عروضي".into(),
        app_name_en: "My Deals".into(),
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_user_gets_profile(pool: PgPool) {
    let user = common::member(&pool, "sara").await;
    let profile = ProfileRepo::find_by_user_id(&pool, user.id)
        .await
        .unwrap()
        .expect("profile created with user");
    assert_eq!(profile.preferred_language, "ar");
    assert!(!profile.is_banned);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_username_rolls_back_profile(pool: PgPool) {
    common::member(&pool, "dup").await;
    let before: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM user_profiles")
        .fetch_one(&pool)
        .await
        .unwrap();

    let again = UserRepo::create_with_profile(
        &pool,
        &kobonat_db::models::user::CreateUser {
            username: "dup".into(),
            email: "other@example.com".into(),
            password_hash: "hash".into(),
            role_id: kobonat_core::roles::ROLE_MEMBER_ID,
        },
        Some("en"),
    )
    .await;
    assert!(again.is_err());

    let after: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM user_profiles")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(before, after);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_ban_and_unban(pool: PgPool) {
    let user = common::member(&pool, "spammer").await;

    let banned = ProfileRepo::ban(&pool, user.id, "spam").await.unwrap().unwrap();
    assert!(banned.is_banned);
    assert_eq!(banned.ban_reason, "spam");

    let lifted = ProfileRepo::unban(&pool, user.id).await.unwrap().unwrap();
    assert!(!lifted.is_banned);
    assert!(lifted.ban_reason.is_empty());

    let updated = ProfileRepo::update(
        &pool,
        user.id,
        &UpdateProfile {
            preferred_language: Some("en".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.preferred_language, "en");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_setup_runs_once(pool: PgPool) {
    assert!(!SetupRepo::is_initialized(&pool).await.unwrap());

    // A member account does not count as initialization.
    common::member(&pool, "early").await;
    assert!(!SetupRepo::is_initialized(&pool).await.unwrap());

    let admin = SetupRepo::complete(&pool, &wizard("admin"))
        .await
        .unwrap()
        .expect("first setup wins");
    assert_eq!(admin.role_id, kobonat_core::roles::ROLE_ADMIN_ID);
    assert!(SetupRepo::is_initialized(&pool).await.unwrap());

    let settings = SettingsRepo::get_or_create(&pool).await.unwrap();
    assert_eq!(settings.app_name, "عروضي");
    assert_eq!(settings.app_name_en, "My Deals");
    assert!(settings.enable_registration);

    assert!(SetupRepo::complete(&pool, &wizard("second"))
        .await
        .unwrap()
        .is_none());
    assert!(UserRepo::find_by_username(&pool, "second").await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_concurrent_setup_has_one_winner(pool: PgPool) {
    let inputs: Vec<_> = (0..4).map(|i| wizard(&format!("admin{i}"))).collect();
    let runs = inputs.iter().map(|input| SetupRepo::complete(&pool, input));
    let winners = futures::future::join_all(runs)
        .await
        .into_iter()
        .filter(|r| matches!(r, Ok(Some(_))))
        .count();
    assert_eq!(winners, 1);

    let admins: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE role_id = 1")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(admins, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_setup_turns_every_feature_on(pool: PgPool) {
    SettingsRepo::update(
        &pool,
        &UpdateSettings {
            enable_english: Some(false),
            enable_registration: Some(false),
            enable_favorites: Some(false),
            enable_notifications: Some(false),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    SetupRepo::complete(&pool, &wizard("admin"))
        .await
        .unwrap()
        .expect("setup completes");

    let settings = SettingsRepo::get_or_create(&pool).await.unwrap();
    assert!(settings.enable_english);
    assert!(settings.enable_registration);
    assert!(settings.enable_favorites);
    assert!(settings.enable_notifications);
}
