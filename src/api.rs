use leptos::prelude::*;
use serde::{Deserialize, Serialize};

use crate::web::http::{ApiClient, HttpResponse};

// =========================================================
// 数据传输对象 (DTOs)
// =========================================================

/// 当前登录用户档案
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub email: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub is_admin: bool,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    user: UserProfile,
}

/// 注册请求体
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub phone: String,
    pub address: String,
    pub pin_code: String,
}

/// 停车场（含可用车位统计）
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ParkingLot {
    pub id: i64,
    pub prime_location_name: String,
    pub price: f64,
    pub address: String,
    pub pin_code: String,
    pub number_of_spots: u32,
    #[serde(default)]
    pub available_spots: u32,
    #[serde(default)]
    pub occupied_spots: u32,
}

/// 预约记录（后端已算好时长与费用）
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Reservation {
    pub id: i64,
    pub lot_name: String,
    pub lot_address: String,
    pub vehicle_number: String,
    pub parking_timestamp: String,
    pub leaving_timestamp: Option<String>,
    pub parking_cost: f64,
    pub status: String,
    pub duration_display: String,
}

#[derive(Serialize)]
struct LoginBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct BookParkingBody<'a> {
    lot_id: i64,
    vehicle_number: &'a str,
}

// =========================================================
// API 客户端
// =========================================================

/// 停车后端 API
///
/// 所有调用都经过共享的被观察客户端，任何一个 401 响应
/// 都会被响应观察者捕获并触发强制登录跳转。
#[derive(Clone)]
pub struct ParkApi {
    client: ApiClient,
}

impl ParkApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// 把非 2xx 响应统一转成错误消息
    async fn expect_ok(res: HttpResponse) -> Result<String, String> {
        let status = res.status();
        let text = res.text().await.map_err(|e| e.to_string())?;
        if (200..300).contains(&status) {
            Ok(text)
        } else {
            Err(format!("请求失败: {}", status))
        }
    }

    /// 登录，成功返回用户档案（调用方按角色选择落地页）
    pub async fn login(&self, email: &str, password: &str) -> Result<UserProfile, String> {
        let body =
            serde_json::to_string(&LoginBody { email, password }).map_err(|e| e.to_string())?;
        let res = self
            .client
            .post("/api/login")
            .json(body)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let text = Self::expect_ok(res).await?;
        let parsed: LoginResponse = serde_json::from_str(&text).map_err(|e| e.to_string())?;
        Ok(parsed.user)
    }

    /// 注册新用户
    pub async fn register(&self, req: &RegisterRequest) -> Result<(), String> {
        let body = serde_json::to_string(req).map_err(|e| e.to_string())?;
        let res = self
            .client
            .post("/api/register")
            .json(body)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        Self::expect_ok(res).await.map(|_| ())
    }

    /// 注销当前会话
    pub async fn logout(&self) -> Result<(), String> {
        let res = self
            .client
            .post("/api/logout")
            .send()
            .await
            .map_err(|e| e.to_string())?;

        Self::expect_ok(res).await.map(|_| ())
    }

    /// 获取停车场列表（普通用户视图）
    pub async fn parking_lots(&self) -> Result<Vec<ParkingLot>, String> {
        let res = self
            .client
            .get("/api/parking-lots")
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let text = Self::expect_ok(res).await?;
        serde_json::from_str(&text).map_err(|e| e.to_string())
    }

    /// 获取停车场列表（管理员视图）
    pub async fn admin_parking_lots(&self) -> Result<Vec<ParkingLot>, String> {
        let res = self
            .client
            .get("/api/admin/parking-lots")
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let text = Self::expect_ok(res).await?;
        serde_json::from_str(&text).map_err(|e| e.to_string())
    }

    /// 预约指定停车场的一个车位
    pub async fn book_parking(&self, lot_id: i64, vehicle_number: &str) -> Result<(), String> {
        let body = serde_json::to_string(&BookParkingBody {
            lot_id,
            vehicle_number,
        })
        .map_err(|e| e.to_string())?;
        let res = self
            .client
            .post("/api/book-parking")
            .json(body)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        Self::expect_ok(res).await.map(|_| ())
    }

    /// 获取我的预约记录
    pub async fn my_reservations(&self) -> Result<Vec<Reservation>, String> {
        let res = self
            .client
            .get("/api/my-reservations")
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let text = Self::expect_ok(res).await?;
        serde_json::from_str(&text).map_err(|e| e.to_string())
    }

    /// 释放（结束）一个预约
    pub async fn release_parking(&self, reservation_id: i64) -> Result<(), String> {
        let res = self
            .client
            .post(&format!("/api/release-parking/{}", reservation_id))
            .send()
            .await
            .map_err(|e| e.to_string())?;

        Self::expect_ok(res).await.map(|_| ())
    }
}

/// 从 Context 获取 API 客户端
pub fn use_api() -> ParkApi {
    use_context::<ParkApi>().expect("ParkApi should be provided")
}
