mod common;

use kobonat_core::i18n::{Lang, Localizable};
use kobonat_db::models::notification::{CreateNotification, NotificationField, UpdateNotification};
use kobonat_db::repositories::NotificationRepo;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_fan_out_creates_rows_once(pool: PgPool) {
    let user = common::member(&pool, "sara").await;
    for title in ["أول", "ثاني", "ثالث"] {
        common::sent_broadcast(&pool, title).await;
    }

    assert_eq!(NotificationRepo::fan_out(&pool, user.id).await.unwrap(), 3);
    assert_eq!(NotificationRepo::unread_count(&pool, user.id).await.unwrap(), 3);

    // A second listing creates nothing new.
    assert_eq!(NotificationRepo::fan_out(&pool, user.id).await.unwrap(), 0);
    let inbox = NotificationRepo::inbox(&pool, user.id).await.unwrap();
    assert_eq!(inbox.len(), 3);
    assert!(inbox.iter().all(|e| !e.is_read));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unsent_notifications_are_not_delivered(pool: PgPool) {
    let user = common::member(&pool, "omar").await;
    NotificationRepo::create(
        &pool,
        &CreateNotification {
            title: "مسودة".into(),
            title_en: Some("Draft".into()),
            message: "لم ترسل".into(),
            message_en: None,
            image: None,
            link: None,
            target_store_id: None,
            send_to_all: None,
        },
    )
    .await
    .unwrap();

    assert_eq!(NotificationRepo::fan_out(&pool, user.id).await.unwrap(), 0);
    assert!(NotificationRepo::inbox(&pool, user.id).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_concurrent_fan_out_never_duplicates(pool: PgPool) {
    let user = common::member(&pool, "lina").await;
    common::sent_broadcast(&pool, "عرض").await;

    let runs = (0..8).map(|_| NotificationRepo::fan_out(&pool, user.id));
    let created: u64 = futures::future::join_all(runs)
        .await
        .into_iter()
        .map(Result::unwrap)
        .sum();
    assert_eq!(created, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_mark_read_is_scoped_to_owner(pool: PgPool) {
    let owner = common::member(&pool, "owner").await;
    let other = common::member(&pool, "other").await;
    common::sent_broadcast(&pool, "تنبيه").await;
    NotificationRepo::fan_out(&pool, owner.id).await.unwrap();

    let entry = NotificationRepo::inbox(&pool, owner.id).await.unwrap().remove(0);

    assert!(!NotificationRepo::mark_read(&pool, other.id, entry.user_notification_id)
        .await
        .unwrap());
    assert!(NotificationRepo::mark_read(&pool, owner.id, entry.user_notification_id)
        .await
        .unwrap());

    let first_read_at = NotificationRepo::inbox(&pool, owner.id).await.unwrap()[0].read_at;
    assert!(first_read_at.is_some());

    // Marking again keeps the original timestamp.
    NotificationRepo::mark_read(&pool, owner.id, entry.user_notification_id)
        .await
        .unwrap();
    let again = NotificationRepo::inbox(&pool, owner.id).await.unwrap()[0].read_at;
    assert_eq!(again, first_read_at);
    assert_eq!(NotificationRepo::unread_count(&pool, owner.id).await.unwrap(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_mark_all_read_and_stats(pool: PgPool) {
    let a = common::member(&pool, "alpha").await;
    let b = common::member(&pool, "beta").await;
    let id = common::sent_broadcast(&pool, "تخفيضات").await;
    common::sent_broadcast(&pool, "جديد").await;

    NotificationRepo::fan_out(&pool, a.id).await.unwrap();
    NotificationRepo::fan_out(&pool, b.id).await.unwrap();
    assert_eq!(NotificationRepo::mark_all_read(&pool, a.id).await.unwrap(), 2);
    assert_eq!(NotificationRepo::mark_all_read(&pool, a.id).await.unwrap(), 0);

    let stats = NotificationRepo::list_with_stats(&pool, 50, 0).await.unwrap();
    let row = stats.iter().find(|s| s.notification.id == id).unwrap();
    assert_eq!(row.recipient_count, 2);
    assert_eq!(row.read_count, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_send_is_one_way(pool: PgPool) {
    let id = common::sent_broadcast(&pool, "مرة واحدة").await;
    let sent_at = NotificationRepo::find_by_id(&pool, id)
        .await
        .unwrap()
        .unwrap()
        .sent_at;

    // Sending again changes nothing.
    assert_eq!(NotificationRepo::send(&pool, &[id]).await.unwrap(), 0);
    let after = NotificationRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    assert!(after.is_sent);
    assert_eq!(after.sent_at, sent_at);

    // Content edits leave delivery state alone.
    let edited = NotificationRepo::update(
        &pool,
        id,
        &UpdateNotification {
            title_en: Some("Once".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert!(edited.is_sent);
    assert_eq!(edited.localized(NotificationField::Title, Lang::En), "Once");

    // The database refuses to unsend.
    let unsend = sqlx::query("UPDATE notifications SET is_sent = false WHERE id = $1")
        .bind(id)
        .execute(&pool)
        .await;
    assert!(unsend.is_err());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_target_store_can_be_cleared(pool: PgPool) {
    let store = common::store(&pool, "noon", "نون").await;
    let created = NotificationRepo::create(
        &pool,
        &CreateNotification {
            title: "عرض المتجر".into(),
            title_en: None,
            message: "خصم جديد".into(),
            message_en: None,
            image: None,
            link: None,
            target_store_id: Some(store.id),
            send_to_all: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(created.target_store_id, Some(store.id));

    // Omitting the field keeps the target.
    let kept = NotificationRepo::update(
        &pool,
        created.id,
        &UpdateNotification {
            title: Some("عرض محدث".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(kept.target_store_id, Some(store.id));

    // The clear flag wins over a supplied id.
    let cleared = NotificationRepo::update(
        &pool,
        created.id,
        &UpdateNotification {
            target_store_id: Some(store.id),
            clear_target_store: true,
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(cleared.target_store_id, None);
}
