// cloudprint/examples/printer_status.rs
// 查询云打印机状态示例

use cloudprint::{CloudApi, CloudAuth, Device, FeieCloud, SpyunCloud, XpyunCloud};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 5 {
        println!("Usage: {} <feie|spyun|xpyun> <app_id> <secret> <sn>", args[0]);
        println!("  Example: {} feie my_account my_ukey 01234", args[0]);
        return Ok(());
    }

    let auth = CloudAuth::new(args[2].as_str(), args[3].as_str());
    let cloud: Box<dyn CloudApi> = match args[1].as_str() {
        "feie" => Box::new(FeieCloud::new(auth)),
        "spyun" => Box::new(SpyunCloud::new(auth)),
        "xpyun" => Box::new(XpyunCloud::new(auth)),
        other => {
            println!("unknown vendor: {other}");
            return Ok(());
        }
    };

    // 查询设备在线与工作状态
    let mut device = Device::new(args[4].as_str());
    match cloud.query_device(&mut device).await {
        Ok(()) => tracing::info!(
            "printer {}: online={} status={:?}",
            device.sn(),
            device.is_online(),
            device.status()
        ),
        Err(e) => tracing::error!("query failed: {}", e),
    }

    Ok(())
}
