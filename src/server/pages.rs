//! Static pages served by the two sentiment services. Kept inline so the
//! binaries stay self-contained.

pub const INDEX_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Review Sentiment</title>
<style>
  body { font-family: sans-serif; max-width: 640px; margin: 3rem auto; padding: 0 1rem; }
  textarea { width: 100%; height: 8rem; font-size: 1rem; padding: 0.5rem; box-sizing: border-box; }
  button { margin-top: 0.75rem; padding: 0.5rem 1.5rem; font-size: 1rem; cursor: pointer; }
  #result { margin-top: 1rem; font-size: 1.25rem; font-weight: bold; }
  #result.positive { color: #1a7f37; }
  #result.negative { color: #b42318; }
  #result.neutral { color: #6b7280; }
</style>
</head>
<body>
<h1>Review Sentiment</h1>
<p>Paste a product review and get its predicted sentiment.</p>
<textarea id="review" placeholder="Type a review..."></textarea>
<br>
<button id="submit">Predict</button>
<div id="result"></div>
<script>
document.getElementById('submit').addEventListener('click', async () => {
  const review = document.getElementById('review').value;
  const result = document.getElementById('result');
  if (!review.trim()) { result.textContent = 'Please enter a review.'; result.className = ''; return; }
  try {
    const response = await fetch('/predict', {
      method: 'POST',
      headers: { 'Content-Type': 'application/json' },
      body: JSON.stringify({ review })
    });
    if (!response.ok) throw new Error(await response.text());
    const data = await response.json();
    result.textContent = 'Sentiment: ' + data.sentiment.toUpperCase();
    result.className = data.sentiment;
  } catch (err) {
    result.textContent = 'Error: ' + err.message;
    result.className = '';
  }
});
</script>
</body>
</html>
"#;

pub const DASHBOARD_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Review Sentiment Dashboard</title>
<style>
  body { font-family: sans-serif; max-width: 960px; margin: 2rem auto; padding: 0 1rem; }
  .cards { display: flex; gap: 1rem; }
  .card { flex: 1; border: 1px solid #d0d7de; border-radius: 6px; padding: 1rem; text-align: center; }
  .card .count { font-size: 2rem; font-weight: bold; }
  .charts { display: flex; gap: 2rem; margin-top: 1.5rem; }
  .words { display: flex; gap: 2rem; margin-top: 1.5rem; }
  .words > div { flex: 1; }
  .wordbar { background: #dbeafe; margin: 2px 0; padding: 1px 4px; white-space: nowrap; font-size: 0.85rem; }
  table { border-collapse: collapse; margin-top: 1rem; width: 100%; }
  td, th { border: 1px solid #d0d7de; padding: 4px 8px; text-align: left; font-size: 0.9rem; }
  #status { color: #b42318; margin: 0.5rem 0; }
  textarea { width: 100%; height: 4rem; box-sizing: border-box; }
</style>
</head>
<body>
<h1>Review Sentiment Dashboard</h1>
<p>
  <input type="file" id="file" accept=".csv">
  <button id="upload">Analyze uploaded CSV</button>
  <button id="reload">Use default file</button>
</p>
<div id="status"></div>
<div class="cards" id="cards"></div>
<div class="charts">
  <div><h3>Distribution (bar)</h3><canvas id="bar" width="400" height="240"></canvas></div>
  <div><h3>Distribution (pie)</h3><canvas id="pie" width="240" height="240"></canvas></div>
</div>
<div class="words" id="words"></div>
<h3>Predicted reviews (preview)</h3>
<table id="preview"><thead><tr><th>body</th><th>predicted sentiment</th></tr></thead><tbody></tbody></table>
<h3>Predict a single review</h3>
<textarea id="single"></textarea><br>
<button id="predict">Predict</button>
<span id="singleResult"></span>
<script>
const COLORS = { positive: '#1a7f37', neutral: '#6b7280', negative: '#b42318' };
const color = label => COLORS[label] || '#2563eb';

function render(summary) {
  const cards = document.getElementById('cards');
  cards.innerHTML = '';
  for (const entry of summary.labels) {
    const card = document.createElement('div');
    card.className = 'card';
    card.innerHTML = '<div>' + entry.label + '</div><div class="count" style="color:' +
      color(entry.label) + '">' + entry.count + '</div>';
    cards.appendChild(card);
  }

  drawBar(summary.labels);
  drawPie(summary.labels, summary.total);
  drawWords(summary.labels);

  const tbody = document.querySelector('#preview tbody');
  tbody.innerHTML = '';
  for (const row of summary.preview) {
    const tr = document.createElement('tr');
    const body = document.createElement('td');
    body.textContent = row.body;
    const label = document.createElement('td');
    label.textContent = row.sentiment;
    label.style.color = color(row.sentiment);
    tr.append(body, label);
    tbody.appendChild(tr);
  }
}

function drawBar(labels) {
  const canvas = document.getElementById('bar');
  const ctx = canvas.getContext('2d');
  ctx.clearRect(0, 0, canvas.width, canvas.height);
  const max = Math.max(1, ...labels.map(l => l.count));
  const barWidth = canvas.width / labels.length - 20;
  labels.forEach((entry, i) => {
    const height = (entry.count / max) * (canvas.height - 40);
    const x = i * (barWidth + 20) + 10;
    ctx.fillStyle = color(entry.label);
    ctx.fillRect(x, canvas.height - 20 - height, barWidth, height);
    ctx.fillStyle = '#000';
    ctx.fillText(entry.label + ' (' + entry.count + ')', x, canvas.height - 5);
  });
}

function drawPie(labels, total) {
  const canvas = document.getElementById('pie');
  const ctx = canvas.getContext('2d');
  ctx.clearRect(0, 0, canvas.width, canvas.height);
  if (!total) return;
  let start = -Math.PI / 2;
  for (const entry of labels) {
    const angle = (entry.count / total) * Math.PI * 2;
    ctx.beginPath();
    ctx.moveTo(120, 120);
    ctx.arc(120, 120, 110, start, start + angle);
    ctx.closePath();
    ctx.fillStyle = color(entry.label);
    ctx.fill();
    start += angle;
  }
}

function drawWords(labels) {
  const container = document.getElementById('words');
  container.innerHTML = '';
  for (const entry of labels) {
    const column = document.createElement('div');
    const heading = document.createElement('h3');
    heading.textContent = entry.label + ' words';
    column.appendChild(heading);
    const max = Math.max(1, ...entry.top_words.map(w => w.count));
    for (const word of entry.top_words) {
      const bar = document.createElement('div');
      bar.className = 'wordbar';
      bar.style.width = Math.max(10, (word.count / max) * 100) + '%';
      bar.textContent = word.word + ' (' + word.count + ')';
      column.appendChild(bar);
    }
    container.appendChild(column);
  }
}

async function loadDefault() {
  const status = document.getElementById('status');
  status.textContent = '';
  try {
    const response = await fetch('/dashboard/summary');
    if (!response.ok) throw new Error(await response.text());
    render(await response.json());
  } catch (err) {
    status.textContent = 'Error: ' + err.message;
  }
}

document.getElementById('reload').addEventListener('click', loadDefault);

document.getElementById('upload').addEventListener('click', async () => {
  const status = document.getElementById('status');
  const input = document.getElementById('file');
  if (!input.files.length) { status.textContent = 'Choose a CSV file first.'; return; }
  const form = new FormData();
  form.append('file', input.files[0]);
  status.textContent = '';
  try {
    const response = await fetch('/dashboard/upload', { method: 'POST', body: form });
    if (!response.ok) throw new Error(await response.text());
    render(await response.json());
  } catch (err) {
    status.textContent = 'Error: ' + err.message;
  }
});

document.getElementById('predict').addEventListener('click', async () => {
  const review = document.getElementById('single').value;
  const target = document.getElementById('singleResult');
  try {
    const response = await fetch('/predict', {
      method: 'POST',
      headers: { 'Content-Type': 'application/json' },
      body: JSON.stringify({ review })
    });
    if (!response.ok) throw new Error(await response.text());
    const data = await response.json();
    target.textContent = ' ' + data.sentiment.toUpperCase();
    target.style.color = color(data.sentiment);
  } catch (err) {
    target.textContent = ' Error: ' + err.message;
    target.style.color = '#b42318';
  }
});

loadDefault();
</script>
</body>
</html>
"#;
