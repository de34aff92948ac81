use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;

use crate::actuation::domain::servo_actuator::ServoActuator;
use crate::control::domain::controller_state::ControllerState;

#[derive(Error, Debug)]
pub enum ActuationError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("actuator at {url} returned status {status}")]
    Status { url: String, status: u16 },
}

/// Aims the camera through the servo host's `/aim_camera` HTTP endpoint.
///
/// One client is shared by every request. Requests that take longer than
/// `timeout` (connect included) fail with `ActuationError::Request`.
pub struct HttpServoActuator {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl HttpServoActuator {
    pub fn new(host: &str, port: u16, timeout: Duration) -> Result<Self, ActuationError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()
            .map_err(ActuationError::Client)?;
        Ok(Self {
            client,
            base_url: format!("http://{host}:{port}"),
        })
    }

    pub fn aim_url(&self, angles: ControllerState) -> String {
        format!(
            "{}/aim_camera?pan={}&tilt={}",
            self.base_url, angles.pan, angles.tilt
        )
    }

    /// Sends the command; any status other than 200 is an error.
    pub fn send(&self, angles: ControllerState) -> Result<String, ActuationError> {
        let url = self.aim_url(angles);
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| ActuationError::Request {
                url: url.clone(),
                source: e,
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ActuationError::Status {
                url,
                status: status.as_u16(),
            });
        }

        response
            .text()
            .map_err(|e| ActuationError::Request { url, source: e })
    }
}

impl ServoActuator for HttpServoActuator {
    fn aim(&self, angles: ControllerState) -> Result<String, Box<dyn std::error::Error>> {
        Ok(self.send(angles)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};

    /// Accepts one connection, returns `response` verbatim, and yields the
    /// request line that was received.
    fn serve_once(response: &'static str) -> (u16, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let handle = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut request_line = String::new();
            reader.read_line(&mut request_line).unwrap();
            let mut line = String::new();
            while reader.read_line(&mut line).unwrap() > 0 && line != "\r\n" {
                line.clear();
            }
            let mut stream = stream;
            stream.write_all(response.as_bytes()).unwrap();
            stream.flush().unwrap();
            request_line
        });
        (port, handle)
    }

    fn actuator(port: u16, timeout_ms: u64) -> HttpServoActuator {
        HttpServoActuator::new("127.0.0.1", port, Duration::from_millis(timeout_ms)).unwrap()
    }

    #[test]
    fn test_aim_url_encodes_angles() {
        let a = actuator(5000, 1000);
        assert_eq!(
            a.aim_url(ControllerState::new(95, 27)),
            "http://127.0.0.1:5000/aim_camera?pan=95&tilt=27"
        );
    }

    #[test]
    fn test_send_returns_body_on_200() {
        let (port, server) = serve_once(
            "HTTP/1.1 200 OK\r\nContent-Length: 11\r\nConnection: close\r\n\r\naimed 95 27",
        );

        let body = actuator(port, 2000).send(ControllerState::new(95, 27)).unwrap();

        assert_eq!(body, "aimed 95 27");
        let request_line = server.join().unwrap();
        assert!(
            request_line.starts_with("GET /aim_camera?pan=95&tilt=27 "),
            "unexpected request: {request_line}"
        );
    }

    #[test]
    fn test_non_200_is_status_error() {
        let (port, server) = serve_once(
            "HTTP/1.1 500 Internal Server Error\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        );

        let result = actuator(port, 2000).send(ControllerState::new(90, 25));

        assert!(matches!(result, Err(ActuationError::Status { status: 500, .. })));
        server.join().unwrap();
    }

    #[test]
    fn test_connection_refused_is_request_error() {
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };

        let result = actuator(port, 500).send(ControllerState::new(90, 25));

        assert!(matches!(result, Err(ActuationError::Request { .. })));
    }

    #[test]
    fn test_unresponsive_endpoint_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let server = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            thread::sleep(Duration::from_millis(800));
            drop(stream);
        });

        let result = actuator(port, 100).send(ControllerState::new(90, 25));

        assert!(matches!(result, Err(ActuationError::Request { .. })));
        server.join().unwrap();
    }

    #[test]
    fn test_trait_object_reports_error() {
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let a: Box<dyn ServoActuator> = Box::new(actuator(port, 500));
        assert!(a.aim(ControllerState::new(90, 25)).is_err());
    }
}
