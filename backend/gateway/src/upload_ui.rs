//! Embedded single-page upload UI.
//!
//! One static HTML page: pick one invoice image, post it to the extraction
//! endpoint as a data-URI, and render the returned table next to the
//! uploaded image. No build step, no assets on disk.

use axum::{Router, response::Html, routing::get};

use crate::server::GatewayState;

/// Returns a router serving the upload page at `/`.
pub fn ui_router() -> Router<GatewayState> {
    Router::new().route("/", get(index))
}

async fn index() -> Html<&'static str> {
    Html(UPLOAD_PAGE)
}

const UPLOAD_PAGE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>VatLens Invoice Processor</title>
<style>
  * { margin: 0; padding: 0; box-sizing: border-box; }
  body {
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
    background: #f3f6fb;
    min-height: 100vh;
    padding: 24px;
  }
  .page { max-width: 1100px; margin: 0 auto; }
  .title {
    text-align: center;
    background: linear-gradient(to right, #4facfe, #00f2fe);
    color: white;
    padding: 20px;
    border-radius: 10px;
    margin-bottom: 16px;
  }
  .warning {
    background: #fff6e0;
    border: 1px solid #f0d48a;
    color: #7a5b00;
    padding: 12px 16px;
    border-radius: 8px;
    margin-bottom: 16px;
  }
  .upload-area {
    border: 2px dashed #4facfe;
    border-radius: 10px;
    padding: 40px 20px;
    text-align: center;
    cursor: pointer;
    background: white;
  }
  .upload-area:hover { background: #f0f8ff; }
  .upload-hint { color: #888; font-size: 0.9em; margin-top: 8px; }
  input[type="file"] { display: none; }
  .loading { text-align: center; padding: 32px; display: none; }
  .spinner {
    border: 4px solid #e4e9f0;
    border-top: 4px solid #4facfe;
    border-radius: 50%;
    width: 44px;
    height: 44px;
    animation: spin 1s linear infinite;
    margin: 0 auto 12px;
  }
  @keyframes spin { to { transform: rotate(360deg); } }
  .error {
    background: #fdecec;
    border: 1px solid #f5b5b5;
    color: #a03030;
    padding: 12px 16px;
    border-radius: 8px;
    margin-top: 16px;
    display: none;
  }
  .results {
    display: none;
    grid-template-columns: 2fr 1fr;
    gap: 16px;
    margin-top: 16px;
  }
  .section {
    background: white;
    padding: 16px;
    border-radius: 10px;
    box-shadow: 0 2px 8px rgba(30, 60, 120, 0.08);
  }
  .section h2 { font-size: 1.1em; margin-bottom: 10px; color: #2a3a55; }
  .invoice-date { margin-bottom: 10px; color: #444; }
  table { width: 100%; border-collapse: collapse; }
  th, td { text-align: left; padding: 8px 10px; border-bottom: 1px solid #e8edf4; }
  th { background: #f6f9fd; color: #2a3a55; font-size: 0.9em; }
  .invoice-image { max-width: 100%; border-radius: 8px; }
  .no-products { color: #777; }
</style>
</head>
<body>
<div class="page">
  <h1 class="title">VatLens Invoice Processor</h1>
  <div class="warning">This system accepts only one invoice image at a time.</div>

  <div class="upload-area" id="uploadArea">
    <div>Click to upload an invoice image</div>
    <div class="upload-hint">jpg, jpeg, or png</div>
    <input type="file" id="fileInput" accept=".jpg,.jpeg,.png">
  </div>

  <div class="loading" id="loading">
    <div class="spinner"></div>
    <p>Processing your invoice, please wait...</p>
  </div>

  <div class="error" id="error"></div>

  <div class="results" id="results">
    <div class="section">
      <h2>Invoice Details</h2>
      <div class="invoice-date" id="invoiceDate"></div>
      <div id="productsArea"></div>
    </div>
    <div class="section">
      <h2>Invoice Image</h2>
      <img id="invoiceImage" class="invoice-image" alt="Uploaded invoice">
    </div>
  </div>
</div>

<script>
  const uploadArea = document.getElementById('uploadArea');
  const fileInput = document.getElementById('fileInput');
  const loading = document.getElementById('loading');
  const errorBox = document.getElementById('error');
  const results = document.getElementById('results');

  const COLUMNS = [
    ['Item_ID', 'Item ID'],
    ['Item_Description', 'Description'],
    ['Unit_Price', 'Unit Price'],
    ['Quantity', 'Quantity'],
    ['Tax', 'Tax'],
    ['Total_Amount', 'Total Amount'],
  ];

  uploadArea.addEventListener('click', () => fileInput.click());

  fileInput.addEventListener('change', () => {
    const file = fileInput.files[0];
    if (!file) return;
    if (!/\.(jpe?g|png)$/i.test(file.name)) {
      showError('Please upload a single jpg, jpeg, or png image.');
      return;
    }
    const reader = new FileReader();
    reader.onload = () => processInvoice(reader.result);
    reader.readAsDataURL(file);
  });

  async function processInvoice(dataUri) {
    errorBox.style.display = 'none';
    results.style.display = 'none';
    loading.style.display = 'block';

    const controller = new AbortController();
    const timer = setTimeout(() => controller.abort(), 60000);
    try {
      const response = await fetch('/api/multiple-invoice', {
        method: 'POST',
        headers: { 'Content-Type': 'application/json' },
        body: JSON.stringify({ image: dataUri }),
        signal: controller.signal,
      });
      if (!response.ok) {
        throw new Error('request failed with status ' + response.status);
      }
      const payload = await response.json();
      render(payload.data || {}, dataUri);
    } catch (err) {
      showError('Error during processing: ' + err.message);
    } finally {
      clearTimeout(timer);
      loading.style.display = 'none';
    }
  }

  function render(data, dataUri) {
    document.getElementById('invoiceDate').textContent = 'Date: ' + (data.date || '-');
    document.getElementById('invoiceImage').src = dataUri;

    const area = document.getElementById('productsArea');
    area.textContent = '';
    const products = data.products || [];
    if (products.length === 0) {
      const note = document.createElement('p');
      note.className = 'no-products';
      note.textContent = 'No products found.';
      area.appendChild(note);
    } else {
      const table = document.createElement('table');
      const head = table.createTHead().insertRow();
      for (const [, label] of COLUMNS) {
        const th = document.createElement('th');
        th.textContent = label;
        head.appendChild(th);
      }
      const body = table.createTBody();
      for (const product of products) {
        const row = body.insertRow();
        for (const [key] of COLUMNS) {
          row.insertCell().textContent = product[key] ?? '';
        }
      }
      area.appendChild(table);
    }

    results.style.display = 'grid';
  }

  function showError(message) {
    loading.style.display = 'none';
    results.style.display = 'none';
    errorBox.textContent = message;
    errorBox.style.display = 'block';
  }
</script>
</body>
</html>
"##;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_posts_to_the_invoice_endpoint() {
        assert!(UPLOAD_PAGE.contains("/api/multiple-invoice"));
    }

    #[test]
    fn page_restricts_upload_to_one_image() {
        assert!(UPLOAD_PAGE.contains("only one invoice image"));
        // The file input must not carry the `multiple` attribute.
        assert!(UPLOAD_PAGE.contains(r#"<input type="file" id="fileInput" accept=".jpg,.jpeg,.png">"#));
    }

    #[test]
    fn page_uses_friendly_column_headers() {
        for header in ["Item ID", "Description", "Unit Price", "Quantity", "Tax", "Total Amount"] {
            assert!(UPLOAD_PAGE.contains(header), "missing header: {header}");
        }
    }
}
