// cloudprint/tests/xpyun.rs
// 芯烨云适配器集成测试

mod common;

use std::sync::Arc;

use cloudprint::{ApiError, CloudApi, CloudError, DeviceStatus, QueryOption, XpyunCloud};
use common::MockEngine;
use serde_json::json;

fn cloud(engine: Arc<MockEngine>) -> XpyunCloud {
    XpyunCloud::with_engine(common::auth(), engine).with_clock(common::clock())
}

const ACK_OK: &str = r#"{"code":0,"msg":"ok","data":true}"#;
const LISTS_OK: &str = r#"{"code":0,"msg":"ok","data":{"success":["01234"],"fail":[],"failMsg":[]}}"#;

#[tokio::test]
async fn test_add_device_signs_and_sends_item_list() {
    let engine = Arc::new(MockEngine::replying(LISTS_OK));
    cloud(engine.clone()).add_device(&common::device()).await.unwrap();

    let call = engine.last_call();
    assert_eq!(call.verb, "POST");
    assert_eq!(call.url, "https://open.xpyun.net/api/openapi/xprinter/addPrinters");
    assert_eq!(
        call.params.get("items"),
        Some(&json!([{"sn": "01234", "name": "快餐前台"}]))
    );
    assert_eq!(call.params.text("user").as_deref(), Some("test_id"));
    assert_eq!(call.params.text("timestamp").as_deref(), Some("1000000000"));
    assert_eq!(
        call.params.text("sign").as_deref(),
        Some("c92c63ca5be6d9d31c71a8cc7e6140d59f79a9af")
    );
    assert_eq!(
        call.headers.get("Content-Type").map(String::as_str),
        Some("application/json;charset=UTF-8")
    );
}

#[tokio::test]
async fn test_add_device_reports_first_refusal() {
    let body = r#"{"code":0,"msg":"ok","data":{"success":[],"fail":["01234"],"failMsg":["不合法的SN"]}}"#;
    let engine = Arc::new(MockEngine::replying(body));
    let err = cloud(engine).add_device(&common::device()).await.unwrap_err();
    assert_eq!(err, CloudError::Vendor("不合法的SN".to_string()));
}

#[tokio::test]
async fn test_delete_device_sends_snlist_array() {
    let engine = Arc::new(MockEngine::replying(LISTS_OK));
    cloud(engine.clone())
        .delete_device(&common::device())
        .await
        .unwrap();

    let call = engine.last_call();
    assert_eq!(call.url, "https://open.xpyun.net/api/openapi/xprinter/delPrinters");
    assert_eq!(call.params.get("snlist"), Some(&json!(["01234"])));
}

#[tokio::test]
async fn test_query_device_status_mapping() {
    for (data, online, status) in [
        (1, true, DeviceStatus::Normal),
        (2, true, DeviceStatus::Anormal),
        (0, false, DeviceStatus::Anormal),
    ] {
        let body = format!(r#"{{"code":0,"msg":"ok","data":{data}}}"#);
        let engine = Arc::new(MockEngine::replying(&body));
        let mut device = common::device();
        cloud(engine.clone()).query_device(&mut device).await.unwrap();

        assert_eq!(device.is_online(), online, "data = {data}");
        assert_eq!(device.status(), status, "data = {data}");
        assert_eq!(
            engine.last_call().url,
            "https://open.xpyun.net/api/openapi/xprinter/queryPrinterStatus"
        );
    }
}

#[tokio::test]
async fn test_update_device_sends_name_and_cardno() {
    let engine = Arc::new(MockEngine::replying(ACK_OK));
    cloud(engine.clone())
        .update_device(&common::device())
        .await
        .unwrap();

    let call = engine.last_call();
    assert_eq!(call.url, "https://open.xpyun.net/api/openapi/xprinter/updPrinter");
    assert_eq!(call.params.text("name").as_deref(), Some("快餐前台"));
    assert_eq!(call.params.text("cardno").as_deref(), Some("13688889999"));
}

#[tokio::test]
async fn test_print_msg_order_sets_id() {
    let body = r#"{"code":0,"msg":"ok","data":"xp_20220101_0001"}"#;
    let engine = Arc::new(MockEngine::replying(body));
    let mut order = common::order();
    cloud(engine.clone())
        .print_msg_order(&common::device(), &mut order)
        .await
        .unwrap();

    assert_eq!(order.id.as_deref(), Some("xp_20220101_0001"));
    let call = engine.last_call();
    assert_eq!(call.url, "https://open.xpyun.net/api/openapi/xprinter/print");
    assert_eq!(
        call.params.text("content").as_deref(),
        Some("this is order content")
    );
    assert_eq!(call.params.get("copies"), Some(&json!(3)));
    assert!(!call.params.contains("expiresIn"));
    assert!(!call.params.contains("mode"));
    assert!(!call.params.contains("backurlFlag"));
}

#[tokio::test]
async fn test_print_turns_expiry_into_countdown() {
    let body = r#"{"code":0,"msg":"ok","data":"xp_20220101_0002"}"#;
    let engine = Arc::new(MockEngine::replying(body));
    let cloud = cloud(engine.clone()).with_backurl_flag(1);
    let mut order = common::order().with_expiry(common::EPOCH + 86_400);
    cloud
        .print_msg_order(&common::device(), &mut order)
        .await
        .unwrap();

    let call = engine.last_call();
    assert_eq!(call.params.get("expiresIn"), Some(&json!(86_400)));
    assert_eq!(call.params.get("mode"), Some(&json!(1)));
    assert_eq!(call.params.get("backurlFlag"), Some(&json!(1)));
}

#[tokio::test]
async fn test_print_label_order_uses_label_path() {
    let body = r#"{"code":0,"msg":"ok","data":"xp_20220101_0003"}"#;
    let engine = Arc::new(MockEngine::replying(body));
    let mut order = common::order();
    cloud(engine.clone())
        .print_label_order(&common::device(), &mut order)
        .await
        .unwrap();

    assert_eq!(order.id.as_deref(), Some("xp_20220101_0003"));
    assert_eq!(
        engine.last_call().url,
        "https://open.xpyun.net/api/openapi/xprinter/printLabel"
    );
}

#[tokio::test]
async fn test_query_order_round_trip() {
    let mut order = common::order().with_id("xp_20220101_0001");

    let waiting_engine = Arc::new(MockEngine::replying(r#"{"code":0,"msg":"ok","data":false}"#));
    cloud(waiting_engine.clone())
        .query_order(&mut order)
        .await
        .unwrap();
    assert!(!order.is_printed());
    let call = waiting_engine.last_call();
    assert_eq!(call.url, "https://open.xpyun.net/api/openapi/xprinter/queryOrderState");
    assert_eq!(call.params.text("orderId").as_deref(), Some("xp_20220101_0001"));

    let printed_engine = Arc::new(MockEngine::replying(r#"{"code":0,"msg":"ok","data":true}"#));
    cloud(printed_engine).query_order(&mut order).await.unwrap();
    assert!(order.is_printed());
}

#[tokio::test]
async fn test_query_device_orders_maps_counts() {
    let body = r#"{"code":0,"msg":"ok","data":{"printed":10,"waiting":2}}"#;
    let engine = Arc::new(MockEngine::replying(body));
    let option = QueryOption::new().with_date("2022-01-01");
    let stat = cloud(engine.clone())
        .query_device_orders(&common::device(), &option)
        .await
        .unwrap();

    assert_eq!(stat.device_sn, "01234");
    assert_eq!(stat.order_date, "2022-01-01");
    assert_eq!(stat.printed_count, 10);
    assert_eq!(stat.waiting_count, 2);
    assert_eq!(
        engine.last_call().url,
        "https://open.xpyun.net/api/openapi/xprinter/queryOrderStatis"
    );
}

#[tokio::test]
async fn test_clear_device_orders() {
    let engine = Arc::new(MockEngine::replying(ACK_OK));
    cloud(engine.clone())
        .clear_device_orders(&common::device())
        .await
        .unwrap();

    let call = engine.last_call();
    assert_eq!(call.url, "https://open.xpyun.net/api/openapi/xprinter/delPrinterQueue");
    assert_eq!(call.params.text("sn").as_deref(), Some("01234"));
}

#[tokio::test]
async fn test_vendor_refusal_passes_message_verbatim() {
    let body = r#"{"code":-2,"msg":"参数错误 : 该帐号未注册","data":null}"#;
    let engine = Arc::new(MockEngine::replying(body));
    let err = cloud(engine)
        .query_device(&mut common::device())
        .await
        .unwrap_err();

    assert_eq!(err, CloudError::Vendor("参数错误 : 该帐号未注册".to_string()));
}

#[tokio::test]
async fn test_unparseable_body_is_parse_failure() {
    let engine = Arc::new(MockEngine::replying("{\"code\":"));
    let err = cloud(engine)
        .query_device(&mut common::device())
        .await
        .unwrap_err();

    assert_eq!(err, CloudError::Parse);
}

#[tokio::test]
async fn test_transport_failure_reaches_every_operation() {
    let engine = Arc::new(MockEngine::failing(ApiError::Status(404)));
    let cloud = cloud(engine);
    let mut device = common::device();
    let mut order = common::order().with_id("xp_20220101_0001");
    let option = QueryOption::new().with_date("2022-01-01");

    let failures = vec![
        cloud.add_device(&device).await.err(),
        cloud.delete_device(&device).await.err(),
        cloud.query_device(&mut device).await.err(),
        cloud.update_device(&device).await.err(),
        cloud.print_msg_order(&device, &mut order).await.err(),
        cloud.print_label_order(&device, &mut order).await.err(),
        cloud.query_order(&mut order).await.err(),
        cloud.query_device_orders(&device, &option).await.err(),
        cloud.clear_device_orders(&device).await.err(),
    ];
    for failure in failures {
        match failure {
            Some(CloudError::Transport(message)) => assert!(message.contains("404")),
            other => panic!("expected transport failure, got {other:?}"),
        }
    }
}
